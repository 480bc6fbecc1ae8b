#![forbid(unsafe_code)]
//! Album walls: a listener's top albums drawn as a rounded-corner grid and served as PNG.
//!
//! The pipeline is metadata -> concurrent cover fetch -> single-surface CPU raster -> PNG.
//! [`CollageRenderer`] is the core; [`router`] exposes it over HTTP and [`WallpaperClient`]
//! consumes the endpoint on the desktop side.

pub(crate) mod assets;
pub(crate) mod client;
pub mod config;
pub(crate) mod encode;
pub(crate) mod foundation;
pub(crate) mod metadata;
pub(crate) mod render;
pub(crate) mod server;
pub mod telemetry;

pub use assets::decode::{PreparedImage, decode_image};
pub use assets::fetch::{
    DEFAULT_FETCH_TIMEOUT, HttpImageFetcher, ImageFailure, ImageFetch, MAX_COVER_BYTES,
};
pub use client::target::CommandTarget;
pub use client::{
    ClientError, DesktopTarget, WallpaperClient, WallpaperState, apply_to_all_displays,
};
pub use encode::png::encode_png;
pub use foundation::core::{CollageSpec, Rgba8};
pub use foundation::error::{AlbumWallError, AlbumWallResult};
pub use metadata::lastfm::{DEFAULT_LASTFM_URL, LastFmFetcher, Period};
pub use metadata::{ImageSource, MetadataFetcher};
pub use render::cpu::{CollageCanvas, FrameRGBA};
pub use render::layout::{Cell, GridLayout};
pub use render::pipeline::{
    CollageRenderer, CollageResult, DEFAULT_FETCH_CONCURRENCY, render_collage,
};
pub use server::handlers::{FAILED_SOURCES_HEADER, USERNAME_MISSING};
pub use server::{AppState, router, serve};
