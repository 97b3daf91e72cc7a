use std::process;

fn main() {
    match npm_usage_cli::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("npm-usage error: {err}");
            process::exit(1);
        }
    }
}
