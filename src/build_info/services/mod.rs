mod build_info_assembler;
mod fragment_merger;
mod graph_builder;
mod locator;
mod module_path_codec;
mod property_filter;
mod requested_by;

pub use build_info_assembler::{BuildIdentity, BuildInfoAssembler, STARTED_FORMAT};
pub use fragment_merger::{FragmentMerger, MergedBuild};
pub use graph_builder::{CargoTree, GraphBuilder, RawPackage};
pub use locator::Locator;
pub use module_path_codec::ModulePathCodec;
pub use property_filter::{collect_env, PropertyFilter, DEFAULT_ENV_EXCLUDE, ENV_PREFIX};
pub use requested_by::{
    Propagation, RequestedByPropagator, DEFAULT_MAX_PATHS_PER_DEPENDENCY,
    DEFAULT_MAX_PATH_LENGTH,
};
