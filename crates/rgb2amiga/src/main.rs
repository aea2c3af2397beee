//! rgb2amiga: convert truecolor PNGs to Amiga IFF bitplane files.
//!
//! Usage: rgb2amiga -i picture.png -o picture.iff [-c 32] [-d] [-s 320x256]
//!
//! Several inputs (with as many outputs) are converted with one shared
//! palette.

mod args;

use std::process;

use amiga_video::ColorSpaceRegistry;
use args::Args;
use clap::Parser;
use log::error;
use rgb2amiga::io::load_png;
use rgb2amiga::{AmigaEncoder, EncodeError, EncodedImage, MedianCutQuantizer, Raster};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.input.len() != args.output.len() {
        eprintln!(
            "error: {} input files but {} output files",
            args.input.len(),
            args.output.len()
        );
        process::exit(1);
    }

    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), EncodeError> {
    let request = args.to_request();
    request.validate()?;
    let registry = ColorSpaceRegistry::builtin();
    let encoder = AmigaEncoder::new(&registry);
    let quantizer = MedianCutQuantizer;

    let rasters = args
        .input
        .iter()
        .map(|path| load_png(path))
        .collect::<Result<Vec<Raster>, EncodeError>>()?;

    if let [raster] = rasters.as_slice() {
        return encoder.encode(raster, &request, &quantizer)?.write(&args.output[0]);
    }

    let results = encoder.encode_batch(&rasters, &request, &quantizer)?;
    let mut failed = 0;
    for ((result, input), output) in results.into_iter().zip(&args.input).zip(&args.output) {
        if let Err(e) = result.and_then(|image: EncodedImage| image.write(output)) {
            error!("{}: {e}", input.display());
            failed += 1;
        }
    }
    if failed > 0 {
        eprintln!("error: {failed} of {} inputs could not be converted", args.input.len());
        process::exit(1);
    }
    Ok(())
}
