use anyhow::Result;
use chrono::SecondsFormat;
use infra::ids::{IdGen, StampId};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "idgen", about = "Generate Identifiers")]
enum Commands {
    #[structopt(name = "gen", about = "Generate Identifiers")]
    Generate(Generate),
    #[structopt(name = "decompose", about = "Decompose Identifiers")]
    Decompose(Decompose),
}

#[derive(Debug, StructOpt)]
struct Generate {
    #[structopt(short = "n", long = "count", default_value = "1")]
    count: usize,
}

#[derive(Debug, StructOpt)]
struct Decompose {
    ids: Vec<StampId>,
}

fn main() -> Result<()> {
    let cmd = Commands::from_args();

    match cmd {
        Commands::Generate(opt) => {
            let idgen = IdGen::new();
            for _ in 0..opt.count {
                println!("{}", idgen.generate());
            }
        }

        Commands::Decompose(opt) => {
            for id in opt.ids {
                let stamp = id.timestamp()?;
                println!("{}: t:{}", id, stamp.to_rfc3339_opts(SecondsFormat::Millis, true));
            }
        }
    }

    Ok(())
}
