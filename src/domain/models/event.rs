use tui_textarea::Input;

use super::ChatError;
use super::ReplyFragment;
use super::SessionHandle;

pub enum Event {
    AssistantFragment(ReplyFragment),
    SessionOpened(SessionHandle),
    SessionFailed(ChatError),
    StreamFailed(ChatError),
    TimerTick(),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLR(),
    KeyboardEnter(),
    KeyboardPaste(String),
    KeyboardTab(),
    UIResize(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
