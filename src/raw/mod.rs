mod arena;
mod handle;
mod node;
mod raw_bos_tree;
mod size;

pub(crate) use handle::Handle;
pub(crate) use node::Side;
pub(crate) use raw_bos_tree::RawBOSTree;
