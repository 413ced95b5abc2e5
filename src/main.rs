use clap::Parser;

mod commands;
mod output;
mod tty;

use commands::rename;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "acf-rename")]
#[command(version = VERSION)]
#[command(
    about = "Rename the ACF field boilerplate: replaces placeholder strings in file names and contents"
)]
struct Cli {
    #[command(flatten)]
    args: rename::RenameArgs,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let result = rename::run(cli.args);
    let (json_result, exit_code) = output::map_cmd_result_to_json(result);

    if output::print_json_result(json_result).is_err() {
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
