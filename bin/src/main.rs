use std::io::Write;
use std::process::ExitCode;

use sugar_backlight::{BacklightBuilder, BrightnessController, Result};

use clap::{ArgGroup, Parser};

/// Query or change the brightness of the preferred backlight device
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(
            ArgGroup::new("action")
                .required(true)
                .multiple(true)
                .args(["get_brightness", "get_max_brightness", "set_brightness"]),
        ))]
struct Args {
    /// Regular expression for the devices to consider
    #[arg(long, value_name = "regex")]
    device: Option<String>,

    /// Get the current brightness
    #[arg(long)]
    get_brightness: bool,

    /// Get the number of brightness levels supported
    #[arg(long)]
    get_max_brightness: bool,

    /// Set the current brightness
    #[arg(long, value_name = "level", allow_negative_numbers = true)]
    set_brightness: Option<i64>,
}

enum Action {
    GetBrightness,
    GetMaxBrightness,
    SetBrightness(i64),
}

impl Args {
    /// When several actions are given, reads win over writes.
    fn action(&self) -> Option<Action> {
        if self.get_brightness {
            Some(Action::GetBrightness)
        } else if self.get_max_brightness {
            Some(Action::GetMaxBrightness)
        } else {
            self.set_brightness.map(Action::SetBrightness)
        }
    }
}

fn run(controller: &BrightnessController, action: Action, out: &mut impl Write) -> Result<()> {
    match action {
        Action::GetBrightness => writeln!(out, "{}", controller.get_brightness()?)?,
        Action::GetMaxBrightness => writeln!(out, "{}", controller.get_max_brightness()?)?,
        Action::SetBrightness(value) => controller.set_brightness(value)?,
    }
    Ok(())
}

fn exit_code(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        // the library has already logged the failure
        Err(e) => {
            log::debug!("{e:?}");
            1
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    // clap's arg group already guarantees one action
    let Some(action) = args.action() else {
        return ExitCode::from(2);
    };

    let mut builder = BacklightBuilder::new();
    if let Some(device) = args.device.as_deref() {
        builder = builder.with_device_regex(device);
    }

    let result = builder
        .build()
        .and_then(|controller| run(&controller, action, &mut std::io::stdout().lock()));
    ExitCode::from(exit_code(&result))
}
