use super::CountdownTimer;
use super::TimerMode;

#[test]
fn it_starts_in_focus_mode() {
    let timer = CountdownTimer::default();
    assert_eq!(timer.mode(), TimerMode::Focus);
    assert_eq!(timer.remaining_seconds(), 1500);
    assert!(!timer.is_running());
}

#[test]
fn it_ignores_ticks_while_paused() {
    let mut timer = CountdownTimer::default();
    timer.tick();
    timer.tick();
    assert_eq!(timer.remaining_seconds(), 1500);
}

#[test]
fn it_counts_down_while_running() {
    let mut timer = CountdownTimer::default();
    timer.start();
    for _ in 0..3 {
        timer.tick();
    }

    assert_eq!(timer.remaining_seconds(), 1497);
    assert!(timer.is_running());
}

#[test]
fn it_never_goes_negative() {
    let mut timer = CountdownTimer::default();
    timer.set_mode(TimerMode::ShortBreak);
    timer.start();

    let mut previous = timer.remaining_seconds();
    for _ in 0..400 {
        timer.tick();
        assert!(timer.remaining_seconds() <= previous);
        previous = timer.remaining_seconds();
        if timer.is_running() {
            timer.start();
        }
    }

    assert_eq!(timer.remaining_seconds(), 0);
    assert!(!timer.is_running());
}

#[test]
fn it_signals_completion_exactly_once() {
    let mut timer = CountdownTimer::default();
    timer.set_mode(TimerMode::ShortBreak);
    timer.start();

    let mut completions = 0;
    for _ in 0..300 {
        if timer.tick() {
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
    assert!(!timer.is_running());

    // A finished countdown stays finished until reset.
    timer.tick();
    assert_eq!(timer.remaining_seconds(), 0);
    assert_eq!(completions, 1);
}

#[test]
fn it_refuses_to_start_at_zero() {
    let mut timer = CountdownTimer::default();
    timer.set_mode(TimerMode::ShortBreak);
    timer.start();
    for _ in 0..300 {
        timer.tick();
    }

    timer.start();
    assert!(!timer.is_running());
}

#[test]
fn it_resets_without_changing_mode() {
    let mut timer = CountdownTimer::default();
    timer.set_mode(TimerMode::LongBreak);
    timer.start();
    timer.tick();
    timer.tick();

    timer.reset();
    assert_eq!(timer.mode(), TimerMode::LongBreak);
    assert_eq!(timer.remaining_seconds(), 900);
    assert!(!timer.is_running());
}

#[test]
fn it_restores_nominal_duration_on_mode_change() {
    let mut timer = CountdownTimer::default();
    timer.start();
    timer.tick();

    timer.set_mode(TimerMode::ShortBreak);
    assert_eq!(timer.remaining_seconds(), 300);
    assert!(!timer.is_running());

    timer.set_mode(TimerMode::Focus);
    assert_eq!(timer.remaining_seconds(), 1500);
}

#[test]
fn it_formats_the_clock() {
    let mut timer = CountdownTimer::default();
    insta::assert_snapshot!(timer.clock(), @"25:00");

    timer.start();
    for _ in 0..63 {
        timer.tick();
    }
    insta::assert_snapshot!(timer.clock(), @"23:57");
}

#[test]
fn it_reports_progress() {
    let mut timer = CountdownTimer::default();
    assert_eq!(timer.progress(), 0.0);

    timer.set_mode(TimerMode::ShortBreak);
    timer.start();
    for _ in 0..150 {
        timer.tick();
    }
    assert!((timer.progress() - 0.5).abs() < f64::EPSILON);
}
