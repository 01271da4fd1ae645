//! Storage driver factory.
use std::path::Path;

use swarm_sim_configuration::Driver;

use self::filesystem::Filesystem;
use self::memory::Memory;
use super::error::Error;
use super::Storage;

pub mod filesystem;
pub mod memory;

/// It builds a new storage driver.
///
/// # Errors
///
/// Will return `Error` if the `filesystem` driver can't create the output
/// directory.
pub fn build(driver: &Driver, output_dir: &Path) -> Result<Box<dyn Storage>, Error> {
    let storage: Box<dyn Storage> = match driver {
        Driver::Filesystem => Box::new(Filesystem::new(output_dir)?),
        Driver::Memory => Box::new(Memory::default()),
    };

    Ok(storage)
}
