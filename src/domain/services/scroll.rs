use ratatui::widgets::ScrollbarState;

/// Chat viewport scrolling. While `follow` is set the view sticks to the
/// newest line, which keeps a streaming reply visible; any manual scroll
/// releases the tail until the user returns to it.
pub struct Scroll {
    list_length: u16,
    viewport_length: u16,
    follow: bool,
    pub position: u16,
    pub scrollbar_state: ScrollbarState,
}

impl Default for Scroll {
    fn default() -> Scroll {
        return Scroll {
            list_length: 0,
            viewport_length: 0,
            follow: true,
            position: 0,
            scrollbar_state: ScrollbarState::default(),
        };
    }
}

impl Scroll {
    pub fn up(&mut self) {
        self.follow = false;
        self.position = self.position.saturating_sub(1);
        self.scrollbar_state.prev();
    }

    pub fn up_page(&mut self) {
        for _ in 0..10 {
            self.up();
        }
    }

    pub fn down(&mut self) {
        self.position = self.position.saturating_add(1).min(self.max_position());
        if self.position == self.max_position() {
            self.follow = true;
        }
        self.scrollbar_state.next();
    }

    pub fn down_page(&mut self) {
        for _ in 0..10 {
            self.down();
        }
    }

    pub fn jump_to_latest(&mut self) {
        self.follow = true;
        self.position = self.max_position();
        self.scrollbar_state.last();
    }

    pub fn set_bounds(&mut self, list_length: u16, viewport_length: u16) {
        self.list_length = list_length;
        self.viewport_length = viewport_length;
        self.scrollbar_state = self
            .scrollbar_state
            .content_length(list_length)
            .viewport_content_length(viewport_length);

        if self.follow {
            self.position = self.max_position();
        } else {
            self.position = self.position.min(self.max_position());
        }
    }

    fn max_position(&self) -> u16 {
        return self.list_length.saturating_sub(self.viewport_length);
    }
}
