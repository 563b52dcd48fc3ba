use super::{CommandSpec, Config, FloatRuleConfig, Keybind, Mousebind};
use crate::BaseCommand;
use tallwm_core::config::{Attribute, GroupConfig, InsertBehavior};
use tallwm_core::layouts::{Columns, Layout, MainAndStack};
use tallwm_core::models::{MouseAction, Rect};

fn run(command: BaseCommand) -> CommandSpec {
    CommandSpec::new(command, "")
}

fn layout(commands: &[&str]) -> Vec<CommandSpec> {
    commands.iter().map(|c| CommandSpec::layout(c)).collect()
}

fn float_rule(attribute: Attribute, pattern: &str) -> FloatRuleConfig {
    FloatRuleConfig {
        attribute,
        pattern: pattern.to_owned(),
    }
}

impl Default for Config {
    // A flat list of bindings reads better than a builder here.
    #[allow(clippy::too_many_lines)]
    fn default() -> Self {
        const MOD: &[&str] = &["modkey"];
        const MOD_SHIFT: &[&str] = &["modkey", "Shift"];
        const MOD_CTRL: &[&str] = &["modkey", "Control"];

        let keybind = vec![
            Keybind::new(MOD_SHIFT, "q", vec![run(BaseCommand::Shutdown)]),
            Keybind::new(&[], "XF86PowerOff", vec![run(BaseCommand::Shutdown)]),
            Keybind::new(MOD_SHIFT, "r", vec![run(BaseCommand::Restart)]),
            Keybind::new(MOD, "c", vec![run(BaseCommand::KillWindow)]),
            Keybind::new(MOD, "n", vec![run(BaseCommand::ToggleMinimize)]),
            Keybind::new(MOD_SHIFT, "n", vec![run(BaseCommand::RestoreMinimized)]),
            Keybind::new(
                MOD_SHIFT,
                "Tab",
                vec![
                    run(BaseCommand::FocusPreviousWindow),
                    run(BaseCommand::DisableFloating),
                ],
            ),
            Keybind::new(MOD, "f", vec![run(BaseCommand::ToggleFullscreen)]),
            Keybind::new(MOD, "t", vec![run(BaseCommand::ToggleFloating)]),
            // Columns first, main and stack second: each layout skips what it lacks.
            Keybind::new(MOD, "h", layout(&["FocusPrevious", "FocusLeft"])),
            Keybind::new(MOD, "l", layout(&["FocusNext", "FocusRight"])),
            Keybind::new(MOD, "k", layout(&["FocusUp"])),
            Keybind::new(MOD, "j", layout(&["FocusDown"])),
            Keybind::new(MOD_SHIFT, "l", layout(&["ClientToNext", "SwapRight"])),
            Keybind::new(MOD_SHIFT, "h", layout(&["ClientToPrevious", "SwapLeft"])),
            Keybind::new(MOD_CTRL, "Return", layout(&["SwapMain"])),
            Keybind::new(MOD_SHIFT, "space", layout(&["Rotate", "Flip"])),
            Keybind::new(MOD_SHIFT, "k", layout(&["ShuffleUp"])),
            Keybind::new(MOD_SHIFT, "j", layout(&["ShuffleDown"])),
            Keybind::new(MOD_CTRL, "m", layout(&["Maximize"])),
            Keybind::new(MOD_CTRL, "n", layout(&["Normalize"])),
            Keybind::new(MOD_CTRL, "l", layout(&["DeleteColumn", "IncreaseRatio"])),
            Keybind::new(MOD_CTRL, "h", layout(&["AddColumn", "DecreaseRatio"])),
            Keybind::new(MOD_CTRL, "k", layout(&["Grow"])),
            Keybind::new(MOD_CTRL, "j", layout(&["Shrink"])),
            Keybind::new(MOD_CTRL, "i", layout(&["IncreaseMainCount"])),
            Keybind::new(MOD_CTRL, "d", layout(&["DecreaseMainCount"])),
            Keybind::new(MOD, "Tab", vec![run(BaseCommand::NextLayout)]),
            Keybind::new(MOD, "grave", vec![run(BaseCommand::FocusLastWindow)]),
            Keybind::new(MOD, "q", vec![CommandSpec::new(BaseCommand::Spawn, "firefox")]),
            Keybind::new(MOD, "Return", vec![CommandSpec::new(BaseCommand::Spawn, "st")]),
            Keybind::new(MOD, "space", vec![CommandSpec::new(BaseCommand::Spawn, "rofi -show")]),
        ];

        let mousebind = vec![
            Mousebind {
                modifier: None,
                button: "Button1".to_owned(),
                action: MouseAction::Move,
            },
            Mousebind {
                modifier: None,
                button: "Button3".to_owned(),
                action: MouseAction::Resize,
            },
            Mousebind {
                modifier: None,
                button: "Button2".to_owned(),
                action: MouseAction::BringToFront,
            },
        ];

        let float_rules = vec![
            float_rule(Attribute::Class, "confirm"),
            float_rule(Attribute::Class, "dialog"),
            float_rule(Attribute::Class, "download"),
            float_rule(Attribute::Class, "error"),
            float_rule(Attribute::Class, "file_progress"),
            float_rule(Attribute::Class, "notification"),
            float_rule(Attribute::Class, "splash"),
            float_rule(Attribute::Class, "toolbar"),
            float_rule(Attribute::Class, "confirmreset"),
            float_rule(Attribute::Class, "makebranch"),
            float_rule(Attribute::Class, "maketag"),
            float_rule(Attribute::Class, "ssh-askpass"),
            float_rule(Attribute::Title, "branchdialog"),
            float_rule(Attribute::Title, "pinentry"),
        ];

        Self {
            modkey: "Mod4".to_owned(),     // win key
            mousekey: Some("Mod4".into()), // win key
            follow_mouse_focus: false,
            focus_new_windows: true,
            insert_behavior: InsertBehavior::Bottom,
            log_level: "info".to_owned(),
            startup: vec![],
            fallback_area: Rect::new(0, 0, 1920, 1080),
            groups: (1..=9).map(|i| GroupConfig::new(&i.to_string())).collect(),
            layouts: vec![
                Layout::MainAndStack(MainAndStack::default()),
                Layout::Columns(Columns::default()),
                Layout::Monocle,
            ],
            float_rules,
            window_rules: vec![],
            keybind,
            mousebind,
        }
    }
}
