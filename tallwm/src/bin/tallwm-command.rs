use anyhow::{bail, Context, Result};
use clap::{arg, command};
use std::fs::OpenOptions;
use std::io::prelude::*;
use tallwm::pipe_display_server::{PipeDisplayServer, PipeInput};
use tallwm::{BaseCommand, CommandSpec};
use tallwm_core::DisplayEvent;

fn main() -> Result<()> {
    let matches = command!("tallwm Command")
        .about("Sends external commands to tallwm")
        .help_template(tallwm::utils::get_help_template())
        .args(&[
            arg!(-l --list "Print a list of available commands with their arguments."),
            arg!([COMMAND] "The command to be sent. See 'list' flag."),
            arg!([VALUE] "The value the command needs, if any."),
        ])
        .get_matches();

    if matches.get_flag("list") {
        print_commandlist();
        return Ok(());
    }
    let Some(name) = matches.get_one::<String>("COMMAND") else {
        bail!("no command given, see --list");
    };
    let value = matches.get_one::<String>("VALUE").map_or("", String::as_str);
    let command: BaseCommand = name.parse()?;
    let command = CommandSpec::new(command, value).to_command()?;
    let line = serde_json::to_string(&PipeInput::Event(DisplayEvent::SendCommand(command)))?;

    let file_path = PipeDisplayServer::pipe_path()?;
    if !file_path.exists() {
        bail!("couldn't find {}, is tallwm running?", file_path.display());
    }
    let mut file = OpenOptions::new()
        .append(true)
        .open(&file_path)
        .with_context(|| format!("couldn't open {}", file_path.display()))?;
    writeln!(file, "{line}").with_context(|| format!("couldn't write to {}", file_path.display()))?;
    Ok(())
}

fn print_commandlist() {
    println!("\n        Available Commands:\n");
    println!("        Commands without arguments:\n");
    for command in BaseCommand::ALL.iter().filter(|c| !c.takes_value()) {
        println!("        {command}");
    }
    println!(
        "
        Commands with arguments:

        Spawn               <shell command>
        GoToGroup           <group name>
        MoveWindowToGroup   <group name>
        SetLayout           MainAndStack | Columns | Monocle
        Layout              <layout command>, e.g. Grow, Flip, AddColumn, FocusNext
        "
    );
}
