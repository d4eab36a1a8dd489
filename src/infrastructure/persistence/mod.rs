mod pg_clip_repository;
mod pg_pool;

pub use pg_clip_repository::PgClipRepository;
pub use pg_pool::create_pool;
