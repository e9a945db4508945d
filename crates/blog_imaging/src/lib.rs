pub mod aspect;
pub mod convert;
pub mod optimize;
pub mod store;

pub use aspect::{crop_plan, ensure_aspect_ratio, Anchor, AspectOutcome, CropRect};
pub use convert::{
    convert_to_webp, convert_to_webp_with_method, encode_webp, ConversionReport, WEBP_BATCH_METHOD, WEBP_METHOD,
    WEBP_QUALITY,
};
pub use optimize::{optimize_directory, pending_conversions, OptimizeSummary};
pub use store::{looks_like_png, write_png};
