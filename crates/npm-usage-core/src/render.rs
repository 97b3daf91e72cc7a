//! Markdown rendering of the install-and-run options for a package.

use serde_json::Value;

pub const DIRECT_NPX_TITLE: &str = "Directly running using npx";
pub const GLOBAL_TITLE: &str = "Global Installation";
pub const GLOBAL_BINARY_TITLE: &str = "Global installation and running using binary name";
pub const GLOBAL_NPX_TITLE: &str = "Global installation and running using npx";
pub const LOCAL_TITLE: &str = "Local installation";
pub const LOCAL_NPX_TITLE: &str = "Local installation and running using npx";
pub const LOCAL_SCRIPT_TITLE: &str = "Local installation and running using npm script";

const PREFACE: &str = "If you are going to use this package in a project - it is recommended to install it [Locally](#local-installation)  \n\
If you are going to use this package for yourself - it is recommended to install it [Globally](#global-installation) or run it directly using [npx](#directly-running-using-npx)";

const SCRIPT_NOTE: &str = "Add npm script to package.json. Note that you can name your script as you want but it must call binary file provided by the package";

/// Everything the renderer needs, fixed once resolution is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInputs {
    pub package_name: String,
    pub command_names: Vec<String>,
    pub heading_level: u8,
}

impl ResolvedInputs {
    pub fn render(&self) -> String {
        render_usage(&self.package_name, &self.command_names, self.heading_level)
    }
}

/// Render the usage document. Deterministic and free of I/O.
///
/// Top-level sections use `heading_level` hashes and their subsections one
/// more. Unless there are several commands, the direct npx line omits
/// `--package` and the command name.
pub fn render_usage(package_name: &str, command_names: &[String], heading_level: u8) -> String {
    let depth = usize::from(heading_level);
    let top = "#".repeat(depth);
    let sub = "#".repeat(depth + 1);

    let direct_npx: Vec<String> = if command_names.len() > 1 {
        command_names
            .iter()
            .map(|name| format!("npx --yes --package {package_name} {name}"))
            .collect()
    } else {
        vec![format!("npx --yes {package_name}")]
    };

    let global_install = format!("npm install --global {package_name}");
    let local_install = format!("npm install {package_name}");

    let mut output = String::new();
    output.push_str(PREFACE);
    output.push('\n');

    push_heading(&mut output, &top, DIRECT_NPX_TITLE);
    push_shell_block(&mut output, &direct_npx);
    output.push('\n');

    push_heading(&mut output, &top, GLOBAL_TITLE);
    push_heading(&mut output, &sub, GLOBAL_BINARY_TITLE);
    push_shell_block(
        &mut output,
        prefixed(&global_install, command_names, |name| name.to_string()),
    );
    output.push('\n');

    push_heading(&mut output, &sub, GLOBAL_NPX_TITLE);
    push_shell_block(
        &mut output,
        prefixed(&global_install, command_names, |name| format!("npx {name}")),
    );
    output.push('\n');

    push_heading(&mut output, &top, LOCAL_TITLE);
    output.push('\n');

    push_heading(&mut output, &sub, LOCAL_NPX_TITLE);
    push_shell_block(
        &mut output,
        prefixed(&local_install, command_names, |name| format!("npx {name}")),
    );
    output.push('\n');

    push_heading(&mut output, &sub, LOCAL_SCRIPT_TITLE);
    push_shell_block(&mut output, [local_install]);
    output.push_str(SCRIPT_NOTE);
    output.push('\n');
    push_scripts_block(&mut output, command_names);
    output.push_str("and run\n");
    push_shell_block(
        &mut output,
        command_names.iter().map(|name| format!("npm run {name}")),
    );

    output.trim().to_string()
}

fn push_heading(output: &mut String, hashes: &str, title: &str) {
    output.push_str(&format!("{hashes} {title}\n"));
}

fn push_shell_block<I, S>(output: &mut String, lines: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    output.push_str("```shell\n");
    for line in lines {
        output.push_str(line.as_ref());
        output.push('\n');
    }
    output.push_str("```\n");
}

fn prefixed<'a, F>(
    first: &'a str,
    command_names: &'a [String],
    line: F,
) -> impl Iterator<Item = String> + 'a
where
    F: Fn(&str) -> String + 'a,
{
    std::iter::once(first.to_string())
        .chain(command_names.iter().map(move |name| line(name.as_str())))
}

fn push_scripts_block(output: &mut String, command_names: &[String]) {
    let entries: Vec<String> = command_names
        .iter()
        .map(|name| {
            let quoted = Value::String(name.clone()).to_string();
            format!("    {quoted}: {quoted}")
        })
        .collect();

    output.push_str("```json\n{\n  \"scripts\": {\n");
    if !entries.is_empty() {
        output.push_str(&entries.join(",\n"));
        output.push('\n');
    }
    output.push_str("  }\n}\n```\n");
}
