//! Modifier and mouse-button masks, and the names users write them with.
use crate::errors::ConfigError;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Represents the state of modifier keys
    #[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[serde(transparent)]
    pub struct ModMask: u16 {
        const Shift = 1;
        const Control = 1 << 1;
        /// Mod1
        const Alt = 1 << 2;
        const Mod3 = 1 << 3;
        /// Mod4
        const Super = 1 << 4;
        const Mod5 = 1 << 5;
    }
}

bitflags! {
    /// Represents the state of the mouse buttons
    #[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[serde(transparent)]
    pub struct Button: u8 {
        /// Main button (left click for right-handed)
        const Button1 = 1;
        /// Middle button (pressing the scroll wheel)
        const Button2 = 1 << 1;
        /// Secondary button (right click for right-handed)
        const Button3 = 1 << 2;
        /// Scroll wheel up
        const Button4 = 1 << 3;
        /// Scroll wheel down
        const Button5 = 1 << 4;
    }
}

/// Combine modifier names into one mask. `modkey` stands for the configured mod key.
///
/// # Errors
///
/// `ConfigError::UnknownModifier` for a name that is not a modifier.
pub fn into_modmask<S: AsRef<str>>(keys: &[S], modkey: ModMask) -> Result<ModMask, ConfigError> {
    keys.iter().try_fold(ModMask::empty(), |mask, key| {
        let key = key.as_ref();
        let bit = if key == "modkey" {
            modkey
        } else {
            into_mod(key)?
        };
        Ok(mask | bit)
    })
}

/// # Errors
///
/// `ConfigError::UnknownModifier` for a name that is not a modifier.
pub fn into_mod(key: &str) -> Result<ModMask, ConfigError> {
    match key {
        "None" => Ok(ModMask::empty()),
        "Shift" => Ok(ModMask::Shift),
        "Control" | "Ctrl" => Ok(ModMask::Control),
        "Mod1" | "Alt" => Ok(ModMask::Alt),
        "Mod3" => Ok(ModMask::Mod3),
        "Mod4" | "Super" => Ok(ModMask::Super),
        "Mod5" => Ok(ModMask::Mod5),
        _ => Err(ConfigError::UnknownModifier(key.to_string())),
    }
}

/// # Errors
///
/// `ConfigError::UnknownButton` for a name that is not a mouse button.
pub fn into_button(name: &str) -> Result<Button, ConfigError> {
    match name {
        "Button1" | "Left" => Ok(Button::Button1),
        "Button2" | "Middle" => Ok(Button::Button2),
        "Button3" | "Right" => Ok(Button::Button3),
        "Button4" | "ScrollUp" => Ok(Button::Button4),
        "Button5" | "ScrollDown" => Ok(Button::Button5),
        _ => Err(ConfigError::UnknownButton(name.to_string())),
    }
}
