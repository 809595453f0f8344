use std::{io, path::PathBuf};

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate as generate_completions, generate_to, Shell};

use crate::cli::Cli;

pub fn generate(shell: Shell, directory: Option<PathBuf>) -> Result<()> {
    let mut command = Cli::command();

    if let Some(dir) = directory {
        std::fs::create_dir_all(&dir)?;
        let path = generate_to(shell, &mut command, "dealmemo", dir)?;
        eprintln!("Generated completion: {}", path.display());
    } else {
        let mut stdout = io::stdout();
        generate_completions(shell, &mut command, "dealmemo", &mut stdout);
    }

    Ok(())
}
