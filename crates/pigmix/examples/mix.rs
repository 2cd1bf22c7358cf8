//! Mix pigments from a JSON spectral dataset.
//!
//! ```text
//! cargo run --example mix -- <dataset.json> <name>=<ratio> <name>=<ratio> [<name>=<ratio>]
//! ```
//!
//! For example, `White=1 "Phthalo Blue (Green Shade)"=0.25` mixes white with a
//! quarter part of phthalo blue. Set `RUST_LOG=debug` to see diagnostics.

use std::error::Error;

use pigmix::data::SpectralStore;
use pigmix::opt::Options;
use pigmix::{Float, Pigment};

static STORE: SpectralStore = SpectralStore::new();

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        return Err("usage: mix <dataset.json> <name>=<ratio>...".into());
    };

    let mut names = Vec::new();
    let mut ratios: Vec<Float> = Vec::new();
    for arg in args {
        let Some((name, ratio)) = arg.rsplit_once('=') else {
            return Err(format!("`{}` should be <name>=<ratio>", arg).into());
        };
        names.push(name.to_owned());
        ratios.push(ratio.parse::<Float>()?);
    }

    let options = Options::from_environment();
    STORE.initialize(pigmix::data::SpectralData::from_path(&path, &options)?)?;
    let mixer = STORE.mixer(options)?;

    let mixture = mixer.select(&names, &ratios)?;
    let result = mixer.mix(&mixture)?;
    println!("paint  {} {}", result.km, result.km.to_hex());
    println!("light  {} {}", result.light, result.light.to_hex());

    let [x, y] = mixer.tristimulus(&mixture)?.chromaticity();
    println!("xy     ({:.4}, {:.4})", x, y);

    if names.len() == 3 {
        let pigments = [
            names[0].parse::<Pigment>()?,
            names[1].parse::<Pigment>()?,
            names[2].parse::<Pigment>()?,
        ];
        let plot = mixer.ternary_plot(&pigments)?;
        println!("{}", serde_json::to_string_pretty(&plot)?);
    } else {
        let pigments = [names[0].parse::<Pigment>()?, names[1].parse::<Pigment>()?];
        println!("{}", serde_json::to_string_pretty(&mixer.gamut(&pigments)?)?);
    }

    Ok(())
}
