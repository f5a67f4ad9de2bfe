use crate::MenuEntry;
use avanto_project::MinigameInfo;
use avanto_render_bridge::{Font, OverlayCommand, OverlayText, Rgba8, SCREEN_WIDTH, TextAlign, TextStyle};

pub const DIM_COLOR: Rgba8 = [0x00, 0x00, 0x00, 0xc0];

pub fn info_text(info: &MinigameInfo) -> String {
    format!(
        "{} by {}\n\n{}\n\n{}",
        info.name, info.developer, info.description, info.instructions
    )
}

pub fn pause_overlay(info: &MinigameInfo, selection: MenuEntry) -> Vec<OverlayCommand> {
    let style_for = |entry: MenuEntry| {
        if entry == selection {
            TextStyle::Selected
        } else {
            TextStyle::Normal
        }
    };

    vec![
        OverlayCommand::Dim { color: DIM_COLOR },
        OverlayCommand::Text(
            OverlayText::new(0, 60, TextStyle::Banner, "PAUSED")
                .with_font(Font::Banner)
                .boxed(SCREEN_WIDTH, TextAlign::Center),
        ),
        OverlayCommand::Text(
            OverlayText::new(10, 85, TextStyle::Normal, info_text(info))
                .boxed(SCREEN_WIDTH - 20, TextAlign::Left),
        ),
        OverlayCommand::Text(OverlayText::new(
            40,
            215,
            style_for(MenuEntry::Resume),
            "RESUME",
        )),
        OverlayCommand::Text(OverlayText::new(
            200,
            215,
            style_for(MenuEntry::Quit),
            "QUIT",
        )),
    ]
}

pub fn fps_overlay(label: impl Into<String>) -> OverlayCommand {
    OverlayCommand::Text(OverlayText::new(10, 235, TextStyle::Normal, label))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(commands: &[OverlayCommand]) -> Vec<(&str, TextStyle)> {
        commands
            .iter()
            .filter_map(|c| match c {
                OverlayCommand::Text(t) => Some((t.text.as_str(), t.style)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn default_info_text() {
        assert_eq!(
            info_text(&MinigameInfo::default()),
            "Avanto by Flavio Zavan\n\nWhatever description\n\nSauna: Hold Z to crouch\nWater: Blabla"
        );
    }

    #[test]
    fn selection_drives_menu_styles() {
        let info = MinigameInfo::default();
        let resume = pause_overlay(&info, MenuEntry::Resume);
        assert_eq!(resume.first(), Some(&OverlayCommand::Dim { color: DIM_COLOR }));
        let t = texts(&resume);
        assert_eq!(t[0], ("PAUSED", TextStyle::Banner));
        assert_eq!(t[2], ("RESUME", TextStyle::Selected));
        assert_eq!(t[3], ("QUIT", TextStyle::Normal));

        let quit = pause_overlay(&info, MenuEntry::Quit);
        let t = texts(&quit);
        assert_eq!(t[2], ("RESUME", TextStyle::Normal));
        assert_eq!(t[3], ("QUIT", TextStyle::Selected));
    }

    #[test]
    fn banner_is_centered_on_screen() {
        let overlay = pause_overlay(&MinigameInfo::default(), MenuEntry::Resume);
        let Some(OverlayCommand::Text(banner)) = overlay.get(1) else {
            panic!("expected banner text");
        };
        assert_eq!(banner.font, Font::Banner);
        assert_eq!(banner.width, Some(SCREEN_WIDTH));
        assert_eq!(banner.align, TextAlign::Center);
    }
}
