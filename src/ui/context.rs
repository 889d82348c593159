use crate::config::{AnimationMode, ColorMode, Config};
use crate::ui::render::RenderOptions;
use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};
use crate::ui::theme::Palette;
use crate::ui::widgets::spinner::Spinner;

/// Resolved presentation choices for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub verbose: u8,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
    pub animation: bool,
}

impl UiContext {
    pub fn new(verbose: u8, cli_color: Option<ColorMode>, cli_no_animation: bool, config: &Config) -> Self {
        let caps = detect_capabilities();
        Self::from_caps(verbose, cli_color, cli_no_animation, config, caps)
    }

    pub fn from_caps(
        verbose: u8,
        cli_color: Option<ColorMode>,
        cli_no_animation: bool,
        config: &Config,
        caps: TerminalCapabilities,
    ) -> Self {
        let unicode = config.output.unicode && caps.supports_unicode;

        let color = match cli_color.unwrap_or(config.output.color) {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => caps.supports_color && !caps.is_ci,
        };

        // Repainting needs cursor movement, so never animate into a pipe.
        let animation = if cli_no_animation || !caps.is_tty {
            false
        } else {
            match config.output.animation {
                AnimationMode::Never => false,
                AnimationMode::Always => true,
                AnimationMode::Auto => !caps.is_ci,
            }
        };

        Self {
            verbose,
            caps,
            color,
            unicode,
            animation,
        }
    }

    pub fn render_options(&self, config: &Config) -> RenderOptions {
        RenderOptions {
            palette: Palette::new(self.color),
            unicode: self.unicode,
            log_tail: config.tree.log_tail,
            indent: config.tree.indent,
            spinner: Spinner::new(config.output.spinner),
        }
    }
}
