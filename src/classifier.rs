use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::border::Border;
use crate::config::EffectiveConfig;
use crate::coords::classify_name;
use crate::error::PruneError;
use crate::model::{Candidate, DeletionSet};

#[derive(Debug, Clone)]
pub struct ClassifierOptions {
    pub directories: Vec<PathBuf>,
    pub border: Border,
}

impl ClassifierOptions {
    pub fn from_config(cfg: &EffectiveConfig) -> Self {
        Self {
            directories: cfg.directories.clone(),
            border: cfg.border,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub candidates: DeletionSet,
    /// Tile files whose name parsed, kept or not.
    pub inspected: usize,
}

impl ScanResult {
    pub fn kept(&self) -> usize {
        self.inspected - self.candidates.len()
    }
}

#[derive(Debug, Clone)]
pub struct Classifier {
    opts: ClassifierOptions,
}

impl Classifier {
    pub fn new(opts: ClassifierOptions) -> Self {
        Self { opts }
    }

    /// Lists every tile file under `root` that lies entirely outside the border.
    ///
    /// Relative directories are resolved against `root`. Missing directories are
    /// skipped; nothing is read or modified.
    pub fn scan(&self, root: &Path) -> Result<ScanResult> {
        let mut out = ScanResult::default();
        for dir in &self.opts.directories {
            let dir = root.join(dir);
            if !dir.exists() {
                debug!(dir = %dir.display(), "directory absent, skipping");
                continue;
            }
            let before = out.candidates.len();
            self.scan_dir(&dir, &mut out)?;
            info!(
                dir = %dir.display(),
                candidates = out.candidates.len() - before,
                "scanned directory"
            );
        }
        Ok(out)
    }

    fn scan_dir(&self, dir: &Path, out: &mut ScanResult) -> Result<()> {
        for ent in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let ent = match ent {
                Ok(ent) => ent,
                Err(err) if err.depth() == 0 => {
                    return Err(PruneError::ReadDir {
                        path: dir.to_path_buf(),
                        source: err,
                    }
                    .into());
                }
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if ent.file_type().is_dir() {
                continue;
            }
            let Some(name) = ent.file_name().to_str() else {
                continue;
            };
            let Some((granularity, coord)) = classify_name(name) else {
                debug!(file = name, "not a tile file");
                continue;
            };

            out.inspected += 1;
            let bounds = coord.bounds(granularity);
            if self.opts.border.intersects(&bounds) {
                continue;
            }
            debug!(file = name, ?bounds, "outside border");
            out.candidates.push(Candidate {
                path: ent.into_path(),
                granularity,
                coord,
                bounds,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Granularity, GridCoordinate};
    use std::fs;
    use tempfile::tempdir;

    fn classifier(dirs: &[&str], border: Border) -> Classifier {
        Classifier::new(ClassifierOptions {
            directories: dirs.iter().map(PathBuf::from).collect(),
            border,
        })
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, b"").expect("write");
    }

    #[test]
    fn mixed_directory_yields_only_tile_files() {
        let dir = tempdir().expect("tmp");
        for name in ["r.10.-5.mca", "c.3.3.mcc", "level.dat", "r.abc.1.mca"] {
            touch(&dir.path().join("region").join(name));
        }

        let out = classifier(&["region"], Border::new(0, 0, 4))
            .scan(dir.path())
            .expect("scan");

        let mut names: Vec<_> = out
            .candidates
            .iter()
            .map(|c| c.path.file_name().expect("name").to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["c.3.3.mcc", "r.10.-5.mca"]);
        assert_eq!(out.inspected, 2);

        let region = out
            .candidates
            .iter()
            .find(|c| c.granularity == Granularity::Region)
            .expect("region");
        assert_eq!(region.coord, GridCoordinate::new(10, -5));
        assert_eq!(region.bounds.min_x, 5120);
        assert_eq!(region.bounds.max_z, -2049);
    }

    #[test]
    fn files_touching_the_border_are_kept() {
        let dir = tempdir().expect("tmp");
        touch(&dir.path().join("region/r.0.0.mca"));
        touch(&dir.path().join("region/r.1.0.mca"));
        touch(&dir.path().join("region/r.-1.-1.mca"));

        let out = classifier(&["region"], Border::new(0, 0, 4))
            .scan(dir.path())
            .expect("scan");
        assert_eq!(out.candidates.len(), 1);
        assert!(out.candidates[0].path.ends_with("r.1.0.mca"));
        assert_eq!(out.kept(), 2);
    }

    #[test]
    fn same_coordinate_in_two_directories_is_two_candidates() {
        let dir = tempdir().expect("tmp");
        touch(&dir.path().join("region/r.5.5.mca"));
        touch(&dir.path().join("entities/r.5.5.mca"));

        let out = classifier(&["region", "entities", "poi"], Border::new(0, 0, 1000))
            .scan(dir.path())
            .expect("scan");
        assert_eq!(out.candidates.len(), 2);
        assert!(out.candidates[0].path.starts_with(dir.path().join("region")));
        assert!(out.candidates[1].path.starts_with(dir.path().join("entities")));
    }

    #[test]
    fn missing_directories_give_empty_set() {
        let dir = tempdir().expect("tmp");
        let out = classifier(&["region", "nope"], Border::new(0, 0, 4))
            .scan(dir.path())
            .expect("scan");
        assert!(out.candidates.is_empty());

        let out = classifier(&[], Border::new(0, 0, 4)).scan(dir.path()).expect("scan");
        assert!(out.candidates.is_empty());
    }

    #[test]
    fn does_not_recurse_or_take_directories() {
        let dir = tempdir().expect("tmp");
        touch(&dir.path().join("region/nested/r.9.9.mca"));
        fs::create_dir_all(dir.path().join("region/r.8.8.mca")).expect("mkdir");

        let out = classifier(&["region"], Border::new(0, 0, 4))
            .scan(dir.path())
            .expect("scan");
        assert!(out.candidates.is_empty());
    }

    #[test]
    fn empty_border_flags_everything() {
        let dir = tempdir().expect("tmp");
        touch(&dir.path().join("region/r.0.0.mca"));
        touch(&dir.path().join("region/c.0.0.mcc"));

        let out = classifier(&["region"], Border::new(0, 0, 0))
            .scan(dir.path())
            .expect("scan");
        assert_eq!(out.candidates.len(), 2);
    }

    #[test]
    fn absolute_directories_ignore_root() {
        let world = tempdir().expect("tmp");
        let other = tempdir().expect("tmp");
        touch(&other.path().join("r.4.0.mca"));

        let dirs = [other.path().to_str().expect("utf8")];
        let out = classifier(&dirs, Border::new(0, 0, 512))
            .scan(world.path())
            .expect("scan");
        assert_eq!(out.candidates.len(), 1);
    }

    #[test]
    fn scanning_twice_is_identical() {
        let dir = tempdir().expect("tmp");
        for i in -3..=3 {
            touch(&dir.path().join(format!("region/r.{i}.{i}.mca")));
            touch(&dir.path().join(format!("poi/c.{}.0.mcc", i * 40)));
        }
        let c = classifier(&["region", "poi"], Border::new(0, 0, 1024));
        let a = c.scan(dir.path()).expect("scan");
        let b = c.scan(dir.path()).expect("scan");
        assert_eq!(a.candidates, b.candidates);
        assert!(!a.candidates.is_empty());
    }

    #[test]
    fn wide_coordinates_are_candidates() {
        let dir = tempdir().expect("tmp");
        touch(&dir.path().join("region/r.3000000000.0.mca"));
        touch(&dir.path().join("region/c.-9999999999.0.mcc"));

        let out = classifier(&["region"], Border::new(0, 0, 4))
            .scan(dir.path())
            .expect("scan");
        assert_eq!(out.inspected, 2);
        assert_eq!(out.candidates.len(), 2);
    }

    #[test]
    fn read_dir_error_names_the_directory() {
        use std::error::Error as _;

        let dir = tempdir().expect("tmp");
        let missing = dir.path().join("region");
        let source = WalkDir::new(&missing)
            .into_iter()
            .next()
            .expect("entry")
            .expect_err("missing root");
        assert_eq!(source.depth(), 0);

        let err = PruneError::ReadDir {
            path: missing.clone(),
            source,
        };
        assert_eq!(err.to_string(), format!("failed listing {}", missing.display()));
        assert!(err.source().is_some());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_is_an_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().expect("tmp");
        let region = dir.path().join("region");
        touch(&region.join("r.9.9.mca"));
        fs::set_permissions(&region, fs::Permissions::from_mode(0o000)).expect("chmod");

        // Privileged users can list it anyway.
        let listable = fs::read_dir(&region).is_ok();
        let result = classifier(&["region"], Border::new(0, 0, 4)).scan(dir.path());
        fs::set_permissions(&region, fs::Permissions::from_mode(0o755)).expect("chmod");
        if listable {
            return;
        }

        let err = result.expect_err("unreadable");
        assert!(matches!(
            err.downcast_ref::<PruneError>(),
            Some(PruneError::ReadDir { path, .. }) if *path == region
        ));
    }
}
