// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;

use costboard::{cli, commands, config, db, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    logging::init(matches.get_count("verbose"));
    let cfg = config::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    let db = db::Database::new(cfg.connection.clone());

    match matches.subcommand() {
        Some(("costs", sub)) => commands::costs::handle(&db, &cfg.report, sub)?,
        Some(("breakdown", sub)) => commands::breakdown::handle(&db, &cfg.report, sub)?,
        Some(("months", sub)) => commands::months::handle(&db, sub)?,
        Some(("export", sub)) => commands::export::handle(&db, &cfg.report, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&db)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
