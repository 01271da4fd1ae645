//! The `filesystem` storage driver.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use swarm_sim_configuration::Driver;
use swarm_sim_primitives::{FileDescriptor, PeerId, SegmentHash};

use crate::storage::error::Error;
use crate::storage::{output_file_name, Storage};

const DRIVER: Driver = Driver::Filesystem;

/// Writes every completed file into the output directory.
#[derive(Debug, Clone)]
pub struct Filesystem {
    output_dir: PathBuf,
}

impl Filesystem {
    /// It creates the output directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Will return an error if the directory can't be created.
    pub fn new(output_dir: &Path) -> Result<Self, Error> {
        fs::create_dir_all(output_dir).map_err(|err| Error::CreateDirFailed {
            path: output_dir.to_path_buf(),
            driver: DRIVER,
            source: Arc::new(err),
        })?;

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    fn path(&self, peer: PeerId, filename: &str) -> PathBuf {
        self.output_dir.join(output_file_name(peer, filename))
    }
}

impl Storage for Filesystem {
    fn save_file(&self, peer: PeerId, file: &FileDescriptor) -> Result<(), Error> {
        let path = self.path(peer, &file.name);

        let content: String = file.segments.iter().map(|hash| format!("{hash}\n")).collect();

        fs::write(&path, content).map_err(|err| Error::WriteFailed {
            path: path.clone(),
            driver: DRIVER,
            source: Arc::new(err),
        })?;

        tracing::debug!(%peer, file = %file.name, path = %path.display(), "file saved");

        Ok(())
    }

    fn load_file(&self, peer: PeerId, filename: &str) -> Result<Option<Vec<SegmentHash>>, Error> {
        let path = self.path(peer, filename);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(Error::ReadFailed {
                    path,
                    driver: DRIVER,
                    source: Arc::new(err),
                })
            }
        };

        let segments = content
            .lines()
            .enumerate()
            .map(|(position, line)| {
                line.parse().map_err(|source| Error::InvalidContent {
                    path: path.clone(),
                    line: position + 1,
                    source,
                })
            })
            .collect::<Result<Vec<SegmentHash>, Error>>()?;

        Ok(Some(segments))
    }
}

#[cfg(test)]
mod tests {

    mod the_filesystem_driver {
        use std::fs;

        use swarm_sim_test_helpers::{configuration, sample};

        use crate::storage::driver::filesystem::Filesystem;
        use crate::storage::Storage;

        #[test]
        fn it_should_create_the_output_directory() {
            let output_dir = configuration::ephemeral_output_dir();

            Filesystem::new(&output_dir).unwrap();

            assert!(output_dir.is_dir());

            fs::remove_dir_all(&output_dir).unwrap();
        }

        #[test]
        fn it_should_write_one_segment_hash_per_line_in_order() {
            let output_dir = configuration::ephemeral_output_dir();
            let storage = Filesystem::new(&output_dir).unwrap();
            let file = sample::file("file1", 2);

            storage.save_file(sample::peer(3), &file).unwrap();

            let content = fs::read_to_string(output_dir.join("client3_file1")).unwrap();
            assert_eq!(content, format!("{}\n{}\n", file.segments[0], file.segments[1]));

            fs::remove_dir_all(&output_dir).unwrap();
        }

        #[test]
        fn it_should_load_a_saved_file() {
            let output_dir = configuration::ephemeral_output_dir();
            let storage = Filesystem::new(&output_dir).unwrap();
            let file = sample::file("file1", 3);

            storage.save_file(sample::peer(1), &file).unwrap();

            assert_eq!(storage.load_file(sample::peer(1), "file1").unwrap(), Some(file.segments));
            assert_eq!(storage.load_file(sample::peer(2), "file1").unwrap(), None);

            fs::remove_dir_all(&output_dir).unwrap();
        }

        #[test]
        fn it_should_fail_to_load_a_file_with_an_invalid_hash() {
            let output_dir = configuration::ephemeral_output_dir();
            let storage = Filesystem::new(&output_dir).unwrap();
            fs::write(output_dir.join("client1_file1"), "not a hash\n").unwrap();

            let err = storage.load_file(sample::peer(1), "file1").unwrap_err();

            assert!(err.to_string().contains("Invalid segment hash at line 1"), "{err}");

            fs::remove_dir_all(&output_dir).unwrap();
        }
    }
}
