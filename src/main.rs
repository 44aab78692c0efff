mod midi;

mod synth;

mod ui;
pub use ui::app;

use anyhow::Context;
use clap::Parser;

/// Control panel for the Synthesmaller synthesizer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Serial port the synthesizer is connected to, e.g. /dev/ttyUSB0
    port_name: String,
}

pub fn main() -> anyhow::Result<()> {
    use iced::Application;

    env_logger::Builder::new()
        .filter_module("synthesmaller_controller", log::LevelFilter::Debug)
        .filter_module("device", log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let synth = synth::Synth::try_new().context("Invalid controls layout")?;

    let settings = iced::Settings {
        window: iced::window::Settings {
            size: (1160, 560),
            ..Default::default()
        },
        ..iced::Settings::with_flags(app::Flags {
            port_name: args.port_name.into(),
            synth,
        })
    };

    ui::App::run(settings).map_err(|err| anyhow::anyhow!("{err}"))
}
