#![allow(dead_code)]

pub mod git;

use git_tfvc::areas::bridge::Bridge;
use git_tfvc::artifacts::branch::tfs_path::TfsPath;
use git_tfvc::artifacts::objects::commit_id::CommitId;
use std::cell::RefCell;
use std::rc::Rc;

pub fn path(p: &str) -> TfsPath {
    TfsPath::try_parse(p).unwrap()
}

/// Deterministic commit id for a changeset number, shared by the fakes and
/// the assertions.
pub fn commit_for(changeset_id: i64) -> CommitId {
    CommitId::try_parse(format!("{changeset_id:040x}")).unwrap()
}

/// Clonable in-memory writer so tests can read back the bridge's progress
/// lines after handing the writer over.
#[derive(Clone, Default)]
pub struct SharedWriter(Rc<RefCell<Vec<u8>>>);

impl SharedWriter {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl std::io::Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub fn bridge(
    tfs: tfs::FakeTfs,
    repository: git::FakeRepository,
) -> (Bridge<tfs::FakeTfs, git::FakeRepository>, SharedWriter) {
    let writer = SharedWriter::default();
    let bridge = Bridge::new(tfs, repository, Box::new(writer.clone()));
    (bridge, writer)
}
