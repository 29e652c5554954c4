// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help(binary_name: &str) {
    println!(
        "Shiftbell v{} - Shift-schedule alarm manager (TUI)",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("SCREENS:");
    println!("    Alarms     Create named alarm sets and manage their times.");
    println!("    Calendar   Assign one alarm set per calendar day; assigned days");
    println!("               get one notification per time in the set.");
    println!();
    println!("KEYBINDINGS:");
    println!("    Tab          Switch between Alarms and Calendar");
    println!("    n            New alarm set (Alarms)");
    println!("    a            Add alarm time to selected set (Alarms)");
    println!("    d            Delete selected alarm (Alarms)");
    println!("    Enter        Assign highlighted set to selected day (Calendar)");
    println!("    u            Unassign selected day (Calendar)");
    println!("    [ / ]        Previous / next month (Calendar)");
    println!("    q            Quit");
    println!();
    println!("DATA:");
    println!("    Alarm sets and the day schedule are stored as JSON under the");
    println!("    platform data directory (override with --root).");
}
