mod command;
mod model;
mod terminal;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
