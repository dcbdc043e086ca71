//! Hash computation for indexed nodes

use crate::tree::node::NodeKind;
use crate::types::{NodeID, NODE_ID_BYTES};

const FIELD_SEPARATOR: &str = "::";

/// Compute the NodeID for a node.
///
/// The id is a pure function of the relative path, the titles from the
/// outermost enclosing heading down to the node itself, the source line and
/// the node kind. BLAKE3 output is truncated to 160 bits.
pub fn compute_node_id(path: &str, title_path: &[String], line: u32, kind: NodeKind) -> NodeID {
    let raw = format!(
        "{path}{sep}{bits}{sep}{line}{sep}{kind}",
        sep = FIELD_SEPARATOR,
        bits = title_path.join(FIELD_SEPARATOR),
        kind = kind.as_str(),
    );

    let mut hasher = blake3::Hasher::new();
    hasher.update(raw.as_bytes());
    let mut out = [0u8; NODE_ID_BYTES];
    hasher.finalize_xof().fill(&mut out);
    hex::encode(out)
}
