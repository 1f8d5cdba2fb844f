use console::style;

use crate::fs::Info;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Echo a command before it runs.
pub fn display_command(command: &str) {
    println!("{} {}", style("$").dim(), command);
}

/// Print the task list, one task per line and nothing else.
pub fn display_task_list(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Directory entry as shown by `ls`: directories get a trailing slash.
pub fn format_entry(info: &Info) -> String {
    if info.is_dir() {
        format!("{}/", info.name())
    } else {
        info.name().to_string()
    }
}

pub fn display_entries(entries: &[Info]) {
    for info in entries {
        let entry = format_entry(info);
        if info.is_dir() {
            println!("{}", style(entry).blue().bold());
        } else {
            println!("{}", entry);
        }
    }
}

/// Resource details as `key: value` lines.
pub fn format_info(path: &str, info: &Info) -> Vec<String> {
    vec![
        format!("path:        {}", path),
        format!("name:        {}", info.name()),
        format!(
            "type:        {}",
            if info.is_dir() { "directory" } else { "file" }
        ),
        format!("size:        {}", info.size()),
        format!(
            "permissions: {} ({:o})",
            info.permissions(),
            info.permissions().mode()
        ),
    ]
}

pub fn display_info(path: &str, info: &Info) {
    for line in format_info(path, info) {
        println!("{}", line);
    }
}
