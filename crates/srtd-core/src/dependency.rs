//! Dependency extraction and resolution between templates.
//!
//! Explicit dependencies are declared with single-line comments of the
//! exact form `-- @depends-on: file1.sql, file2.sql` (case-insensitive,
//! multiple lines merge). Block comments and occurrences inside string
//! literals are ignored -- inferring dependencies from `FROM`/`JOIN`/
//! `REFERENCES` is explicitly out of scope (spec.md §9).

use std::collections::{HashMap, HashSet};

/// Extracts the basenames declared via `-- @depends-on:` lines in `content`.
///
/// Matching is case-insensitive on the marker only; file names are taken
/// verbatim (trimmed). Lines are matched literally -- this is deliberately
/// not a general SQL parser.
pub fn extract_depends_on(content: &str) -> Vec<String> {
    let mut deps = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim_start();
        if !trimmed.starts_with("--") {
            continue;
        }
        let after_dashes = trimmed.trim_start_matches('-').trim_start();
        let lower = after_dashes.to_ascii_lowercase();
        if let Some(rest) = lower.strip_prefix("@depends-on:") {
            let start = after_dashes.len() - rest.len();
            let raw = &after_dashes[start..];
            for part in raw.split(',') {
                let name = part.trim();
                if !name.is_empty() {
                    deps.push(name.to_string());
                }
            }
        }
    }
    deps
}

/// A dependency graph over template paths. Edges point from dependent to
/// dependency (`a depends on b` is stored as an edge `a -> b`).
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Discovery order, preserved for stable tie-breaking in the topo sort.
    nodes: Vec<String>,
    edges: HashMap<String, Vec<String>>,
}

/// A cycle found during resolution, recorded as the full path of nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle(pub Vec<String>);

impl DependencyGraph {
    /// Builds a graph from discovered templates.
    ///
    /// `name_to_path` maps a template's basename (without `.sql`) to its
    /// full identity key (typically `relative_path`), used to resolve
    /// `@depends-on:` basenames. Unknown basenames are silently dropped;
    /// self-edges are dropped.
    pub fn build<'a, I>(templates: I, name_to_path: &HashMap<String, String>) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [String])>,
    {
        let mut graph = DependencyGraph::default();
        for (path, declared_deps) in templates {
            graph.nodes.push(path.to_string());
            let mut resolved = Vec::new();
            for dep_name in declared_deps {
                let dep_basename = dep_name.trim_end_matches(".sql");
                if let Some(dep_path) = name_to_path.get(dep_basename) {
                    if dep_path != path {
                        resolved.push(dep_path.clone());
                    }
                }
            }
            graph.edges.insert(path.to_string(), resolved);
        }
        graph
    }

    /// Detects cycles via DFS with an on-stack set. Every cycle found is
    /// recorded with its full path; an engine surfaces these as warnings,
    /// never as a fatal error.
    pub fn find_cycles(&self) -> Vec<Cycle> {
        let mut cycles = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut on_stack: Vec<&str> = Vec::new();

        for node in &self.nodes {
            if !visited.contains(node.as_str()) {
                self.cycle_dfs(node, &mut visited, &mut on_stack, &mut cycles);
            }
        }
        cycles
    }

    fn cycle_dfs<'a>(
        &'a self,
        node: &'a str,
        visited: &mut HashSet<&'a str>,
        on_stack: &mut Vec<&'a str>,
        cycles: &mut Vec<Cycle>,
    ) {
        visited.insert(node);
        on_stack.push(node);

        if let Some(deps) = self.edges.get(node) {
            for dep in deps {
                let dep: &str = dep.as_str();
                if let Some(pos) = on_stack.iter().position(|n| *n == dep) {
                    let cycle_path: Vec<String> =
                        on_stack[pos..].iter().map(|s| s.to_string()).collect();
                    cycles.push(Cycle(cycle_path));
                } else if !visited.contains(dep) {
                    let dep_owned = self.nodes.iter().find(|n| n.as_str() == dep);
                    if let Some(dep_owned) = dep_owned {
                        self.cycle_dfs(dep_owned, visited, on_stack, cycles);
                    }
                }
            }
        }

        on_stack.pop();
    }

    /// Returns a dependencies-before-dependents topological order.
    ///
    /// Ties are broken by discovery order so that repeated runs over
    /// identical inputs produce identical orderings. On a cycle, the
    /// offending back-edge is simply not re-traversed (best-effort DFS
    /// order) rather than raising an error.
    pub fn topo_order(&self) -> Vec<String> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut on_stack: HashSet<&str> = HashSet::new();
        let mut order: Vec<String> = Vec::with_capacity(self.nodes.len());

        for node in &self.nodes {
            self.topo_dfs(node, &mut visited, &mut on_stack, &mut order);
        }
        order
    }

    fn topo_dfs<'a>(
        &'a self,
        node: &'a str,
        visited: &mut HashSet<&'a str>,
        on_stack: &mut HashSet<&'a str>,
        order: &mut Vec<String>,
    ) {
        if visited.contains(node) {
            return;
        }
        if on_stack.contains(node) {
            // Cycle back-edge: stop here, let the caller's progress win.
            return;
        }
        on_stack.insert(node);
        if let Some(deps) = self.edges.get(node) {
            for dep in deps {
                self.topo_dfs(dep, visited, on_stack, order);
            }
        }
        on_stack.remove(node);
        visited.insert(node);
        order.push(node.to_string());
    }
}
