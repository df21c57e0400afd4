#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeStore {
    is_dark: bool,
}

impl ThemeStore {
    pub fn new(is_dark: bool) -> Self {
        Self { is_dark }
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn toggle(&mut self) {
        self.is_dark = !self.is_dark;
    }
}
