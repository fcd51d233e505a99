use uniflux_api::decode_geo;

use crate::cli::{GeoArgs, GlobalOpts};
use crate::commands::read_file;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &GeoArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let bytes = read_file(&args.file)?;
    let geo = decode_geo(&bytes)
        .map_err(|err| CliError::decode(&args.file.display().to_string(), err))?;
    output::write_one(&mut std::io::stdout().lock(), &geo, global.output)
}
