pub mod cache;
pub mod hashing;
pub mod parallel;
pub mod static_provider;

pub use cache::CachedProvider;
pub use hashing::HashingProvider;
pub use parallel::ParallelProvider;
pub use static_provider::StaticProvider;

use passage_core::traits::EmbedProvider;

/// Default embedding dimensionality for the shipped hashing provider.
pub const DEFAULT_DIM: usize = 256;

/// The provider the search binary runs with. `APP_EMBED_DIM` overrides
/// the dimensionality of the hashing provider.
pub fn default_provider() -> Box<dyn EmbedProvider> {
    let dim = std::env::var("APP_EMBED_DIM")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|d| *d > 0)
        .unwrap_or(DEFAULT_DIM);
    Box::new(HashingProvider::new(dim))
}
