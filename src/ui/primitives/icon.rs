use crate::ui::theme::{self, Tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Failure,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        match (supports_unicode, self) {
            (true, Icon::Success) => theme::icons::SUCCESS,
            (true, Icon::Failure) => theme::icons::FAILURE,
            (false, Icon::Success) => theme::icons_ascii::SUCCESS,
            (false, Icon::Failure) => theme::icons_ascii::FAILURE,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Icon::Success => Tone::Success,
            Icon::Failure => Tone::Failure,
        }
    }
}
