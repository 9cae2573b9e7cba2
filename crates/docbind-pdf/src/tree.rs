//! Package/module tree of an assembly run.
//!
//! Packages and modules are stored in flat vectors with children tracked by
//! index, so insertion can create intermediate packages on demand and sorting
//! only reorders index lists.
//!
//! Every dot-separated segment of a module fqn except the last names a
//! package level: `a.b.c` lives in package `a.b`, which lives in `a`, which
//! lives in the unnamed root package.

use std::collections::HashMap;

use docbind_symbols::ModuleSymbols;

/// One documented module.
#[derive(Clone, Debug)]
pub struct Module {
    /// Fully-qualified name, e.g. `tango.io.Stdout`.
    pub fqn: String,
    /// Last fqn segment, e.g. `Stdout`.
    pub name: String,
    /// Rewritten HTML body of the module page.
    pub content: String,
    /// Symbols declared in the module.
    pub symbols: ModuleSymbols,
}

impl Module {
    /// Create a module from its fqn, rewritten content and symbols.
    #[must_use]
    pub fn new(fqn: impl Into<String>, content: impl Into<String>, symbols: ModuleSymbols) -> Self {
        let fqn = fqn.into();
        let name = last_segment(&fqn).to_owned();
        Self {
            fqn,
            name,
            content: content.into(),
            symbols,
        }
    }

    /// Fqn of the package containing this module (`""` for top-level modules).
    #[must_use]
    pub fn package_fqn(&self) -> &str {
        self.fqn.rsplit_once('.').map_or("", |(package, _)| package)
    }
}

/// A package level of the tree.
#[derive(Clone, Debug)]
pub struct Package {
    /// Last fqn segment (`""` for the root).
    pub name: String,
    /// Fully-qualified name (`""` for the root).
    pub fqn: String,
    packages: Vec<usize>,
    modules: Vec<usize>,
}

impl Package {
    fn new(fqn: &str) -> Self {
        Self {
            name: last_segment(fqn).to_owned(),
            fqn: fqn.to_owned(),
            packages: Vec::new(),
            modules: Vec::new(),
        }
    }

    /// Whether the package contains sub-packages or modules.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.packages.is_empty() || !self.modules.is_empty()
    }

    /// Whether the package has sub-packages.
    #[must_use]
    pub fn has_packages(&self) -> bool {
        !self.packages.is_empty()
    }

    /// Whether the package directly contains modules.
    #[must_use]
    pub fn has_modules(&self) -> bool {
        !self.modules.is_empty()
    }
}

/// Index of the root package.
const ROOT: usize = 0;

/// Hierarchical package/module structure plus a flat module list.
#[derive(Clone, Debug)]
pub struct PackageTree {
    packages: Vec<Package>,
    modules: Vec<Module>,
    package_index: HashMap<String, usize>,
    /// Module indices in flat (TOC) order.
    flat: Vec<usize>,
}

impl Default for PackageTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageTree {
    /// Create a tree containing only the root package.
    #[must_use]
    pub fn new() -> Self {
        let mut package_index = HashMap::new();
        package_index.insert(String::new(), ROOT);
        Self {
            packages: vec![Package::new("")],
            modules: Vec::new(),
            package_index,
            flat: Vec::new(),
        }
    }

    /// Insert a module, creating its package chain as needed.
    pub fn add_module(&mut self, module: Module) {
        let package = self.ensure_package(module.package_fqn());
        let idx = self.modules.len();
        self.modules.push(module);
        self.packages[package].modules.push(idx);
        self.flat.push(idx);
    }

    /// Index of the package with `fqn`, creating it and its parents if missing.
    fn ensure_package(&mut self, fqn: &str) -> usize {
        if let Some(&idx) = self.package_index.get(fqn) {
            return idx;
        }
        let parent = match fqn.rsplit_once('.') {
            Some((parent, _)) => self.ensure_package(parent),
            None => ROOT,
        };
        let idx = self.packages.len();
        self.packages.push(Package::new(fqn));
        self.packages[parent].packages.push(idx);
        self.package_index.insert(fqn.to_owned(), idx);
        idx
    }

    /// Sort every package's children and the flat module list.
    ///
    /// Packages and modules are ordered case-insensitively by short name at
    /// every level; the flat list is ordered case-insensitively by fqn.
    /// Equal keys keep insertion order.
    pub fn sort(&mut self) {
        for i in 0..self.packages.len() {
            let mut packages = std::mem::take(&mut self.packages[i].packages);
            packages.sort_by_cached_key(|&p| self.packages[p].name.to_lowercase());
            self.packages[i].packages = packages;

            let mut modules = std::mem::take(&mut self.packages[i].modules);
            modules.sort_by_cached_key(|&m| self.modules[m].name.to_lowercase());
            self.packages[i].modules = modules;
        }
        let modules = &self.modules;
        self.flat
            .sort_by_cached_key(|&m| modules[m].fqn.to_lowercase());
    }

    /// The unnamed root package.
    #[must_use]
    pub fn root(&self) -> &Package {
        &self.packages[ROOT]
    }

    /// Sub-packages of `package` in tree order.
    pub fn packages_of<'a>(&'a self, package: &'a Package) -> impl Iterator<Item = &'a Package> {
        package.packages.iter().map(|&i| &self.packages[i])
    }

    /// Modules directly inside `package` in tree order.
    pub fn modules_of<'a>(&'a self, package: &'a Package) -> impl Iterator<Item = &'a Module> {
        package.modules.iter().map(|&i| &self.modules[i])
    }

    /// All modules in flat order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.flat.iter().map(|&i| &self.modules[i])
    }

    /// Modules in nested order: depth-first, sub-packages before modules.
    #[must_use]
    pub fn nested_modules(&self) -> Vec<&Module> {
        fn walk<'a>(tree: &'a PackageTree, package: &'a Package, out: &mut Vec<&'a Module>) {
            for sub in tree.packages_of(package) {
                walk(tree, sub, out);
            }
            out.extend(tree.modules_of(package));
        }
        let mut out = Vec::with_capacity(self.modules.len());
        walk(self, self.root(), &mut out);
        out
    }

    /// Look up a package by fqn.
    #[must_use]
    pub fn package(&self, fqn: &str) -> Option<&Package> {
        self.package_index.get(fqn).map(|&i| &self.packages[i])
    }

    /// Look up a module by fqn.
    #[must_use]
    pub fn module(&self, fqn: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.fqn == fqn)
    }

    /// Number of modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the tree has no modules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Number of packages, excluding the root.
    #[must_use]
    pub fn package_count(&self) -> usize {
        self.packages.len() - 1
    }
}

/// Last dot-separated segment of an fqn.
fn last_segment(fqn: &str) -> &str {
    fqn.rsplit('.').next().unwrap_or(fqn)
}
