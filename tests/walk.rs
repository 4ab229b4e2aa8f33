//! End-to-end traversal scenarios against the library API.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use fscout::plugins::{CounterPlugin, Counters, ScopePlugin, TreePlugin, TreeState};
use fscout::{
    DirEvent, EntryEvent, IgnoreSet, Plugin, PluginConfig, PluginHost, Result, SharedContext,
    TraversalEntry, Walker, ignore_rules,
};

fn rel_paths(root: &Path, output: &[TraversalEntry]) -> Vec<String> {
    output
        .iter()
        .map(|e| fscout::paths::root_relative(root, &e.path))
        .collect()
}

/// The project-tree fixture: a go module inside a git checkout, with a
/// root-level rule file excluding logs.
fn create_project_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join(".file_ignore"), "*.log\n").unwrap();
    fs::create_dir_all(root.join("a/.git")).unwrap();
    fs::write(root.join("a/.git/HEAD"), "ref: refs/heads/main\n").unwrap();
    fs::write(root.join("a/go.mod"), "module example.com/a\n").unwrap();
    fs::create_dir_all(root.join("a/src")).unwrap();
    fs::write(root.join("a/src/main.go"), "package main\n").unwrap();
    fs::create_dir_all(root.join("a/dist")).unwrap();
    fs::write(root.join("a/dist/out.bin"), "\x7f").unwrap();
    fs::write(root.join("a/trace.log"), "noise\n").unwrap();
    dir
}

fn scoped_host(root: &Path) -> PluginHost {
    let files = vec![root.join(ignore_rules::IGNORE_FILE_NAME)];
    let ignore = ignore_rules::load_ignore_files(&files).unwrap();
    let mut host = PluginHost::new(ignore, root);
    let config = PluginConfig::default();
    host.install(Box::new(CounterPlugin::new()), &config);
    host.install(Box::new(TreePlugin::new()), &config);
    host.install(Box::new(ScopePlugin::new()), &config);
    host
}

#[test]
fn test_project_scopes_prune_ecosystem_directories() {
    let dir = create_project_tree();
    let root = dir.path();
    let mut host = scoped_host(root);
    let mut output = Vec::new();
    Walker::new().walk(root, &mut output, &mut host).unwrap();

    let rel = rel_paths(root, &output);
    // The git control directory is pruned entirely.
    assert!(!rel.iter().any(|p| p.contains(".git")));
    // The go marker at `a` triggers the anchored dist exclusion.
    assert!(!rel.iter().any(|p| p.contains("dist")));
    // Sources survive.
    assert!(rel.contains(&"a/src/main.go".to_string()));
    assert!(rel.contains(&"a/go.mod".to_string()));
    // The root-level rule file excludes logs everywhere.
    assert!(!rel.iter().any(|p| p.ends_with(".log")));
}

#[test]
fn test_scope_restores_base_ignore_after_walk() {
    let dir = create_project_tree();
    let root = dir.path();
    let mut host = scoped_host(root);
    let base_patterns = host.context().ignore.patterns().to_vec();

    let mut output = Vec::new();
    Walker::new().walk(root, &mut output, &mut host).unwrap();

    // Every scope pushed during the walk was popped again.
    assert_eq!(host.context().ignore.patterns(), base_patterns.as_slice());
}

#[test]
fn test_counter_and_tree_agree_on_totals() {
    let dir = create_project_tree();
    let root = dir.path();
    let mut host = scoped_host(root);
    let mut output = Vec::new();
    Walker::new().walk(root, &mut output, &mut host).unwrap();

    let counters = *host.context().state::<Counters>(CounterPlugin::NAME).unwrap();
    let tree = *host.context().state::<TreeState>(TreePlugin::NAME).unwrap();

    let dirs = output.iter().filter(|e| e.kind.is_dir()).count() as u64;
    let files = output.len() as u64 - dirs;
    assert_eq!(counters.dirs, dirs);
    assert_eq!(counters.files, files);
    assert_eq!(tree.items, output.len() as u64);
    assert_eq!(counters.depth, 0);
}

#[test]
fn test_walk_twice_is_identical() {
    let dir = create_project_tree();
    let root = dir.path();

    let mut first = Vec::new();
    let mut host = scoped_host(root);
    Walker::new().walk(root, &mut first, &mut host).unwrap();

    let mut second = Vec::new();
    let mut host = scoped_host(root);
    Walker::new().walk(root, &mut second, &mut host).unwrap();

    assert_eq!(first, second);
}

/// A minimal counting plugin parameterized by identity, for the
/// two-plugins-one-event scenario.
struct DirTally {
    name: &'static str,
}

impl Plugin for DirTally {
    fn name(&self) -> &'static str {
        self.name
    }

    fn install(&mut self, ctx: &mut SharedContext, _config: &PluginConfig) {
        ctx.insert_state(self.name, 0u64);
    }

    fn on_before_dir(&mut self, ctx: &mut SharedContext, _event: EntryEvent<'_>) -> Result<()> {
        if let Some(count) = ctx.state_mut::<u64>(self.name) {
            *count += 1;
        }
        Ok(())
    }
}

#[test]
fn test_two_plugins_observe_the_same_events() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    for name in ["one", "two", "three"] {
        fs::create_dir(root.join(name)).unwrap();
        fs::write(root.join(name).join("f.txt"), "x").unwrap();
    }

    let mut host = PluginHost::new(IgnoreSet::new(), root);
    let config = PluginConfig::default();
    host.install(Box::new(DirTally { name: "tally_a" }), &config);
    host.install(Box::new(DirTally { name: "tally_b" }), &config);

    let mut output = Vec::new();
    Walker::new().walk(root, &mut output, &mut host).unwrap();

    // Both plugins saw every BeforeDir, under separate namespaces.
    assert_eq!(host.context().state::<u64>("tally_a"), Some(&3));
    assert_eq!(host.context().state::<u64>("tally_b"), Some(&3));
}

/// Records which directories ever received a `Before`.
struct EnteredRecorder;

impl Plugin for EnteredRecorder {
    fn name(&self) -> &'static str {
        "entered"
    }

    fn install(&mut self, ctx: &mut SharedContext, _config: &PluginConfig) {
        ctx.insert_state("entered", Vec::<PathBuf>::new());
    }

    fn on_before(&mut self, ctx: &mut SharedContext, event: DirEvent<'_>) -> Result<()> {
        if let Some(entered) = ctx.state_mut::<Vec<PathBuf>>("entered") {
            entered.push(event.path.to_path_buf());
        }
        Ok(())
    }
}

#[test]
fn test_skipped_subtree_is_never_entered() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("node_modules/dep")).unwrap();
    fs::write(root.join("node_modules/dep/index.js"), "x").unwrap();
    fs::create_dir(root.join("src")).unwrap();
    fs::write(root.join("src/app.js"), "x").unwrap();

    let mut ignore = IgnoreSet::new();
    ignore.add(["node_modules"]).unwrap();
    let mut host = PluginHost::new(ignore, root);
    host.install(Box::new(EnteredRecorder), &PluginConfig::default());

    let mut output = Vec::new();
    Walker::new().walk(root, &mut output, &mut host).unwrap();

    let entered = host.context().state::<Vec<PathBuf>>("entered").unwrap();
    assert!(entered.iter().any(|p| p.ends_with("src")));
    assert!(!entered.iter().any(|p| {
        p.components()
            .any(|c| c.as_os_str() == "node_modules")
    }));
    // And nothing beneath the skipped directory reached the output.
    assert!(!rel_paths(root, &output)
        .iter()
        .any(|p| p.contains("node_modules")));
}

#[test]
fn test_nested_node_project_only_pruned_inside_scope() {
    // dist at the top level survives; dist inside the node project is
    // pruned once package.json flips the node marker.
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir(root.join("dist")).unwrap();
    fs::write(root.join("dist/keep.txt"), "x").unwrap();
    fs::create_dir_all(root.join("web/dist")).unwrap();
    fs::write(root.join("web/package.json"), "{}").unwrap();
    fs::write(root.join("web/dist/bundle.js"), "x").unwrap();

    let mut host = PluginHost::new(IgnoreSet::new(), root);
    host.install(Box::new(ScopePlugin::new()), &PluginConfig::default());

    let mut output = Vec::new();
    Walker::new().walk(root, &mut output, &mut host).unwrap();

    let rel = rel_paths(root, &output);
    assert!(rel.contains(&"dist".to_string()));
    assert!(rel.contains(&"dist/keep.txt".to_string()));
    assert!(rel.contains(&"web".to_string()));
    assert!(!rel.iter().any(|p| p.starts_with("web/dist")));
}
