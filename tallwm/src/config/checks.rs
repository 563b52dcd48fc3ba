use super::Config;
use tallwm_core::config::{check_keybind_groups, check_rule_groups, GroupConfig};
use tallwm_core::models::{Groups, Keybindings};
use tallwm_core::Config as _;
use tracing_subscriber::EnvFilter;

impl Config {
    /// Run every check, printing what is wrong. Returns true if the configuration
    /// would be accepted by the window manager.
    pub fn check_all(&self, verbose: bool) -> bool {
        self.check_mousekey(verbose);
        self.check_log_level(verbose);
        let results = [
            self.check_groups_and_layouts(verbose),
            self.check_keybinds(verbose),
            self.check_rules(verbose),
        ];
        results.iter().all(|ok| *ok)
    }

    pub fn check_mousekey(&self, verbose: bool) {
        if verbose {
            println!("Checking if mousekey is set.");
        }
        if let Some(mousekey) = &self.mousekey {
            if mousekey.is_empty() {
                println!("Your mousekey is set to nothing, this will cause windows to move/resize with just a mouse press.");
                return;
            }
            if verbose {
                println!("Mousekey is okay.");
            }
        }
    }

    pub fn check_log_level(&self, verbose: bool) {
        if verbose {
            println!("Trying to parse log_level.");
        }
        match EnvFilter::builder().parse(&self.log_level) {
            Ok(_) if verbose => println!("Log level is ok."),
            Ok(_) => {}
            Err(err) => println!("Log level is invalid: {err}"),
        }
    }

    fn check_groups_and_layouts(&self, verbose: bool) -> bool {
        println!("\x1b[0;94m::\x1b[0m Checking groups and layouts . . .");
        let result = self
            .layouts()
            .and_then(|layouts| {
                layouts.iter().try_for_each(tallwm_core::layouts::Layout::validate)?;
                Groups::new(&self.groups, &layouts)
            });
        match result {
            Ok(groups) => {
                if verbose {
                    let names: Vec<&str> = self.groups.iter().map(|g: &GroupConfig| g.name.as_str()).collect();
                    println!("Groups: {}", names.join(", "));
                }
                println!("\x1b[0;92m    -> {} groups OK\x1b[0m", groups.len());
                true
            }
            Err(err) => {
                println!("\x1b[1;91mERROR: {err}\x1b[0m");
                false
            }
        }
    }

    /// Check every keybinding: modifiers, command values, group names and chord
    /// conflicts, including conflicts with the derived group keys.
    pub fn check_keybinds(&self, verbose: bool) -> bool {
        println!("\x1b[0;94m::\x1b[0m Checking keybinds . . .");
        if verbose {
            for keybind in &self.keybind {
                println!("Keybind: {keybind:?}");
            }
        }
        let result = self.modkey().and_then(|modkey| {
            let keybinds = self.keybinds()?;
            check_keybind_groups(&self.groups, &keybinds)?;
            Keybindings::build(modkey, &self.groups, keybinds)
        });
        match result {
            Ok(table) => {
                println!("\x1b[0;92m    -> All {} keybinds OK\x1b[0m", table.len());
                true
            }
            Err(err) => {
                println!(
                    "\x1b[1;91mERROR: {err}\x1b[0m\nHelp: change one of the keybindings to something else."
                );
                false
            }
        }
    }

    fn check_rules(&self, verbose: bool) -> bool {
        println!("\x1b[0;94m::\x1b[0m Checking rules . . .");
        let mut ok = true;
        for err in [
            self.mousebinds().err(),
            self.float_rules().err(),
            self.window_rules()
                .and_then(|rules| check_rule_groups(&self.groups, &rules))
                .err(),
        ]
        .into_iter()
        .flatten()
        {
            println!("\x1b[1;91mERROR: {err}\x1b[0m");
            ok = false;
        }
        if ok {
            if verbose {
                println!(
                    "{} float rules, {} window rules",
                    self.float_rules.len(),
                    self.window_rules.len()
                );
            }
            println!("\x1b[0;92m    -> All rules OK\x1b[0m");
        }
        ok
    }
}
