use clap::Subcommand;
use duct::cmd;

#[derive(Subcommand)]
pub enum Fuzz {
    /// Run BLS type #1 (UAPI) entry parser
    Uapi,

    /// Run GRUB configuration parser
    Grub,

    /// Run GRUB menuentry block extractor
    Menuentry,
}

pub fn fuzz_parsers(command: Fuzz) -> anyhow::Result<()> {
    let mut args = vec!["fuzz", "run"];
    match command {
        Fuzz::Uapi => args.push("uapi"),
        Fuzz::Grub => args.push("grub"),
        Fuzz::Menuentry => args.push("menuentry"),
    }

    cmd!("cargo", "install", "cargo-fuzz").run()?; // will not install if its already installed
    cmd("cargo", args).run()?;
    Ok(())
}
