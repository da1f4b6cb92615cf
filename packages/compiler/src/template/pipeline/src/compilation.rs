//! Compilation Module
//!
//! The core compilation structures phases run over: a job owning one or more units, each unit
//! owning a creation and an update instruction list.

use indexmap::IndexMap;

use crate::config::PipelineConfig;
use crate::template::pipeline::ir;

/// The kind of compilation job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilationJobKind {
    /// Template compilation
    Tmpl,
    /// Host binding compilation
    Host,
}

/// An entire ongoing compilation, which will result in one or more template functions when complete.
/// Contains one or more corresponding compilation units.
pub trait CompilationJob {
    /// Get the component name
    fn component_name(&self) -> &str;
    /// Get the compatibility mode
    fn compatibility(&self) -> ir::CompatibilityMode;
    /// Get the job kind
    fn kind(&self) -> CompilationJobKind;
    /// Get the function suffix
    fn fn_suffix(&self) -> &str;
    /// Get the root compilation unit
    fn root(&self) -> &dyn CompilationUnit;
    /// All compilation units, root first.
    fn units(&self) -> Box<dyn Iterator<Item = &dyn CompilationUnit> + '_>;
    /// All compilation units, root first.
    fn units_mut(&mut self) -> Box<dyn Iterator<Item = &mut dyn CompilationUnit> + '_>;
    /// Allocate a new XrefId
    fn allocate_xref_id(&mut self) -> ir::XrefId;
}

/// Compilation-in-progress of a whole component's template, including the main template and any
/// embedded views.
#[derive(Debug)]
pub struct ComponentCompilationJob {
    pub component_name: String,
    pub compatibility: ir::CompatibilityMode,
    pub root: ViewCompilationUnit,
    /// Embedded views, in allocation order.
    pub views: IndexMap<ir::XrefId, ViewCompilationUnit>,

    next_xref_id: ir::XrefId,
}

impl ComponentCompilationJob {
    pub fn new(component_name: impl Into<String>, compatibility: ir::CompatibilityMode) -> Self {
        let root_xref = ir::XrefId::new(0);

        ComponentCompilationJob {
            component_name: component_name.into(),
            compatibility,
            root: ViewCompilationUnit::new(root_xref, None),
            views: IndexMap::new(),
            next_xref_id: ir::XrefId::new(1),
        }
    }

    pub fn from_config(component_name: impl Into<String>, config: &PipelineConfig) -> Self {
        Self::new(component_name, config.compatibility)
    }

    /// Add a `ViewCompilationUnit` for a new embedded view to this compilation.
    pub fn allocate_view(&mut self, parent: Option<ir::XrefId>) -> ir::XrefId {
        let xref = self.allocate_xref_id();
        let view = ViewCompilationUnit::new(xref, parent);
        self.views.insert(xref, view);
        xref
    }

    /// Look up a unit by xref, whether it's the root or an embedded view.
    pub fn view(&self, xref: ir::XrefId) -> Option<&ViewCompilationUnit> {
        if xref == self.root.xref {
            Some(&self.root)
        } else {
            self.views.get(&xref)
        }
    }

    pub fn view_mut(&mut self, xref: ir::XrefId) -> Option<&mut ViewCompilationUnit> {
        if xref == self.root.xref {
            Some(&mut self.root)
        } else {
            self.views.get_mut(&xref)
        }
    }
}

impl CompilationJob for ComponentCompilationJob {
    fn component_name(&self) -> &str {
        &self.component_name
    }

    fn compatibility(&self) -> ir::CompatibilityMode {
        self.compatibility
    }

    fn kind(&self) -> CompilationJobKind {
        CompilationJobKind::Tmpl
    }

    fn fn_suffix(&self) -> &str {
        "Template"
    }

    fn root(&self) -> &dyn CompilationUnit {
        &self.root
    }

    fn units(&self) -> Box<dyn Iterator<Item = &dyn CompilationUnit> + '_> {
        let root = &self.root as &dyn CompilationUnit;
        let views = self.views.values().map(|v| v as &dyn CompilationUnit);
        Box::new(std::iter::once(root).chain(views))
    }

    fn units_mut(&mut self) -> Box<dyn Iterator<Item = &mut dyn CompilationUnit> + '_> {
        let root = &mut self.root as &mut dyn CompilationUnit;
        let views = self.views.values_mut().map(|v| v as &mut dyn CompilationUnit);
        Box::new(std::iter::once(root).chain(views))
    }

    fn allocate_xref_id(&mut self) -> ir::XrefId {
        let id = self.next_xref_id;
        self.next_xref_id = ir::XrefId::new(id.as_usize() + 1);
        id
    }
}

/// A compilation unit is compiled into a template function. Some example units are views and host
/// bindings.
pub trait CompilationUnit {
    /// Get the xref ID
    fn xref(&self) -> ir::XrefId;
    /// Get the function name
    fn fn_name(&self) -> Option<&str>;
    /// Set the function name
    fn set_fn_name(&mut self, name: String);
    /// Get the create operations list
    fn create(&self) -> &ir::CreateOpList;
    /// Get the create operations list (mutable)
    fn create_mut(&mut self) -> &mut ir::CreateOpList;
    /// Get the update operations list
    fn update(&self) -> &ir::UpdateOpList;
    /// Get the update operations list (mutable)
    fn update_mut(&mut self) -> &mut ir::UpdateOpList;
}

/// Compilation-in-progress of an individual view within a template.
#[derive(Debug)]
pub struct ViewCompilationUnit {
    pub xref: ir::XrefId,
    pub parent: Option<ir::XrefId>,
    pub decls: Option<usize>,

    pub fn_name: Option<String>,
    pub create: ir::CreateOpList,
    pub update: ir::UpdateOpList,
}

impl ViewCompilationUnit {
    pub fn new(xref: ir::XrefId, parent: Option<ir::XrefId>) -> Self {
        ViewCompilationUnit {
            xref,
            parent,
            decls: None,
            fn_name: None,
            create: ir::OpList::new(),
            update: ir::OpList::new(),
        }
    }
}

impl CompilationUnit for ViewCompilationUnit {
    fn xref(&self) -> ir::XrefId {
        self.xref
    }

    fn fn_name(&self) -> Option<&str> {
        self.fn_name.as_deref()
    }

    fn set_fn_name(&mut self, name: String) {
        self.fn_name = Some(name);
    }

    fn create(&self) -> &ir::CreateOpList {
        &self.create
    }

    fn create_mut(&mut self) -> &mut ir::CreateOpList {
        &mut self.create
    }

    fn update(&self) -> &ir::UpdateOpList {
        &self.update
    }

    fn update_mut(&mut self) -> &mut ir::UpdateOpList {
        &mut self.update
    }
}

/// Compilation-in-progress of a host binding, which contains a single unit for that host binding.
#[derive(Debug)]
pub struct HostBindingCompilationJob {
    pub component_name: String,
    pub compatibility: ir::CompatibilityMode,
    pub root: HostBindingCompilationUnit,

    next_xref_id: ir::XrefId,
}

impl HostBindingCompilationJob {
    pub fn new(component_name: impl Into<String>, compatibility: ir::CompatibilityMode) -> Self {
        HostBindingCompilationJob {
            component_name: component_name.into(),
            compatibility,
            root: HostBindingCompilationUnit::new(),
            next_xref_id: ir::XrefId::new(1),
        }
    }

    pub fn from_config(component_name: impl Into<String>, config: &PipelineConfig) -> Self {
        Self::new(component_name, config.compatibility)
    }
}

impl CompilationJob for HostBindingCompilationJob {
    fn component_name(&self) -> &str {
        &self.component_name
    }

    fn compatibility(&self) -> ir::CompatibilityMode {
        self.compatibility
    }

    fn kind(&self) -> CompilationJobKind {
        CompilationJobKind::Host
    }

    fn fn_suffix(&self) -> &str {
        "HostBindings"
    }

    fn root(&self) -> &dyn CompilationUnit {
        &self.root
    }

    fn units(&self) -> Box<dyn Iterator<Item = &dyn CompilationUnit> + '_> {
        // HostBinding (job.root) is a single unit
        Box::new(std::iter::once(&self.root as &dyn CompilationUnit))
    }

    fn units_mut(&mut self) -> Box<dyn Iterator<Item = &mut dyn CompilationUnit> + '_> {
        Box::new(std::iter::once(&mut self.root as &mut dyn CompilationUnit))
    }

    fn allocate_xref_id(&mut self) -> ir::XrefId {
        let id = self.next_xref_id;
        self.next_xref_id = ir::XrefId::new(id.as_usize() + 1);
        id
    }
}

#[derive(Debug)]
pub struct HostBindingCompilationUnit {
    pub xref: ir::XrefId,
    pub fn_name: Option<String>,
    pub create: ir::CreateOpList,
    pub update: ir::UpdateOpList,
}

impl HostBindingCompilationUnit {
    pub fn new() -> Self {
        HostBindingCompilationUnit {
            xref: ir::XrefId::new(0),
            fn_name: None,
            create: ir::OpList::new(),
            update: ir::OpList::new(),
        }
    }
}

impl Default for HostBindingCompilationUnit {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilationUnit for HostBindingCompilationUnit {
    fn xref(&self) -> ir::XrefId {
        self.xref
    }

    fn fn_name(&self) -> Option<&str> {
        self.fn_name.as_deref()
    }

    fn set_fn_name(&mut self, name: String) {
        self.fn_name = Some(name);
    }

    fn create(&self) -> &ir::CreateOpList {
        &self.create
    }

    fn create_mut(&mut self) -> &mut ir::CreateOpList {
        &mut self.create
    }

    fn update(&self) -> &ir::UpdateOpList {
        &self.update
    }

    fn update_mut(&mut self) -> &mut ir::UpdateOpList {
        &mut self.update
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_yield_root_then_views_in_allocation_order() {
        let mut job = ComponentCompilationJob::new("App", ir::CompatibilityMode::Normal);
        let first = job.allocate_view(Some(job.root.xref));
        let second = job.allocate_view(Some(first));

        let xrefs: Vec<_> = job.units().map(|unit| unit.xref()).collect();
        assert_eq!(xrefs, vec![ir::XrefId::new(0), first, second]);

        let xrefs_mut: Vec<_> = job.units_mut().map(|unit| unit.xref()).collect();
        assert_eq!(xrefs_mut, xrefs);
    }

    #[test]
    fn test_xref_allocation_is_monotonic() {
        let mut job = ComponentCompilationJob::new("App", ir::CompatibilityMode::Normal);
        let a = job.allocate_xref_id();
        let b = job.allocate_xref_id();
        assert!(b.as_usize() > a.as_usize());
        assert_ne!(a, job.root.xref);
    }

    #[test]
    fn test_host_job_has_single_unit() {
        let mut job = HostBindingCompilationJob::new("App", ir::CompatibilityMode::Normal);
        assert_eq!(job.kind(), CompilationJobKind::Host);
        assert_eq!(job.fn_suffix(), "HostBindings");
        assert_eq!(job.units().count(), 1);
        assert_eq!(job.units_mut().count(), 1);
    }

    #[test]
    fn test_from_config() {
        let config = PipelineConfig::new(ir::CompatibilityMode::TemplateDefinitionBuilder);
        let job = ComponentCompilationJob::from_config("App", &config);
        assert_eq!(job.compatibility(), ir::CompatibilityMode::TemplateDefinitionBuilder);
        assert_eq!(job.component_name(), "App");
    }
}
