//! Projection CLI commands.
//!
//! `project to-pixels` and `project to-geo` convert between geographic and
//! world pixel coordinates under Web-Mercator.

use clap::Subcommand;
use geomap::coord::DEFAULT_TILE_SIZE;
use geomap::{GeoPoint, MapProjection, PixelPoint, WEB_MERCATOR};

use crate::error::CliError;

/// Projection subcommands.
#[derive(Debug, Subcommand)]
pub enum ProjectCommands {
    /// Convert latitude/longitude to world pixel coordinates
    ToPixels {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        #[arg(long, short)]
        zoom: u16,

        /// Tile edge in pixels
        #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
        tile_size: u32,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Convert world pixel coordinates to latitude/longitude
    ToGeo {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        #[arg(long, allow_hyphen_values = true)]
        y: f64,

        #[arg(long, short)]
        zoom: u16,

        /// Tile edge in pixels
        #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
        tile_size: u32,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Run a projection subcommand.
pub fn run(command: ProjectCommands) -> Result<(), CliError> {
    match command {
        ProjectCommands::ToPixels {
            lat,
            lon,
            zoom,
            tile_size,
            json,
        } => {
            let geo = GeoPoint::new(lat, lon);
            let pixel = WEB_MERCATOR.geo_to_pixels(&geo, zoom, tile_size);
            let (tile_x, tile_y) = WEB_MERCATOR.geo_to_tile(&geo, zoom, tile_size);
            if json {
                println!("{}", serde_json::to_string_pretty(&pixel)?);
            } else {
                println!("x: {:.3}", pixel.x);
                println!("y: {:.3}", pixel.y);
                println!("tile: {}/{}/{}", zoom, tile_x, tile_y);
            }
        }
        ProjectCommands::ToGeo {
            x,
            y,
            zoom,
            tile_size,
            json,
        } => {
            let geo = WEB_MERCATOR.pixels_to_geo(PixelPoint::new(x, y), zoom, tile_size);
            if json {
                println!("{}", serde_json::to_string_pretty(&geo)?);
            } else {
                println!("lat: {:.8}", geo.latitude);
                println!("lon: {:.8}", geo.longitude);
            }
        }
    }
    Ok(())
}
