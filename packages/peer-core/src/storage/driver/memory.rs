//! The `memory` storage driver.
use std::collections::BTreeMap;

use parking_lot::RwLock;
use swarm_sim_primitives::{FileDescriptor, PeerId, SegmentHash};

use crate::storage::error::Error;
use crate::storage::Storage;

/// Keeps every completed file in memory, indexed by peer and file name.
#[derive(Debug, Default)]
pub struct Memory {
    files: RwLock<BTreeMap<(PeerId, String), Vec<SegmentHash>>>,
}

impl Storage for Memory {
    fn save_file(&self, peer: PeerId, file: &FileDescriptor) -> Result<(), Error> {
        self.files
            .write()
            .insert((peer, file.name.clone()), file.segments.clone());

        tracing::debug!(%peer, file = %file.name, "file saved in memory");

        Ok(())
    }

    fn load_file(&self, peer: PeerId, filename: &str) -> Result<Option<Vec<SegmentHash>>, Error> {
        Ok(self.files.read().get(&(peer, filename.to_owned())).cloned())
    }
}
