#![allow(clippy::unwrap_used)]
use anyhow::Result;
use clap::ValueEnum;
use clap_complete::{generate_to, Shell};
use clap_mangen::Man;
use solar_clock::cli_args_command;
use std::{env, fs, path::PathBuf};

fn main() -> Result<()> {
    const NAME: &str = "solar-clock";
    let out = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    let target = out.ancestors().nth(3).unwrap().to_owned();
    let mut cmd = cli_args_command().name(NAME);

    // shell completions
    let completion = target.join("completion");
    fs::create_dir_all(&completion)?;
    for &shell in Shell::value_variants() {
        generate_to(shell, &mut cmd, NAME, &completion)?;
    }

    // man pages, one per subcommand
    let man1 = target.join("man1");
    fs::create_dir_all(&man1)?;
    cmd.build();
    let mut buf = Vec::new();
    Man::new(cmd.clone()).render(&mut buf)?;
    fs::write(man1.join(format!("{NAME}.1")), &buf)?;
    for sub in cmd.get_subcommands() {
        let name = format!("{NAME}-{}", sub.get_name());
        let mut buf = Vec::new();
        Man::new(sub.clone().name(&name)).render(&mut buf)?;
        fs::write(man1.join(format!("{name}.1")), &buf)?;
    }

    Ok(())
}
