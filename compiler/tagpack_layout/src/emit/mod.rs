//! Plan emitters and expression rendering.
//!
//! The planner never produces target source itself. Emitters consume a
//! [`UnionPlan`] through [`PlanEmitter`]; the `render_*` helpers turn the
//! plan's expressions into a neutral C-like notation for listings and
//! tests.

use std::fmt::Write;

use crate::alloc::OVERLAP_TYPE_NAME;
use crate::expr::{AccessExpr, CaseAccess, Construction, InitExpr};
use crate::field::FieldId;
use crate::layout::UnionLayout;
use crate::plan::UnionPlan;
use crate::present::UnionNames;
use crate::value::ArgPath;

/// Trait for consumers of finished plans.
pub trait PlanEmitter {
    type Error;

    /// Emit one union.
    fn emit(&mut self, plan: &UnionPlan<'_>) -> Result<(), Self::Error>;

    /// Emit several unions, stopping at the first failure.
    fn emit_all(&mut self, plans: &[UnionPlan<'_>]) -> Result<(), Self::Error> {
        for plan in plans {
            self.emit(plan)?;
        }
        Ok(())
    }
}

/// Dotted member path from the union root, e.g. `_overlapped.Circle_radius`.
pub fn render_path(layout: &UnionLayout<'_>, path: &[FieldId]) -> String {
    layout.path_names(path)
}

/// Render a guarded read, e.g. `Kind == 1 ? _data_shared1 : default`.
pub fn render_access(layout: &UnionLayout<'_>, names: &UnionNames, access: &CaseAccess) -> String {
    match access {
        CaseAccess::IsCase { tag } => format!("{} == {tag}", names.tag_property),
        CaseAccess::Guarded { tag, value } => {
            let mut out = format!("{} == {tag} ? ", names.tag_property);
            write_access(&mut out, layout, value);
            out.push_str(" : default");
            out
        }
    }
}

/// Render a storage constructor call, e.g.
/// `new(kind: 2, shared1: width, rectangle_height: height)`.
pub fn render_construction(
    layout: &UnionLayout<'_>,
    names: &UnionNames,
    construction: &Construction<'_>,
) -> String {
    let mut out = format!("new({}: {}", names.tag_argument, construction.tag);
    for init in &construction.inits {
        let field = layout.field(init.field);
        let arg = field.ctor_arg.as_deref().unwrap_or(&field.name);
        let _ = write!(out, ", {arg}: ");
        write_init(&mut out, layout, &init.value);
    }
    out.push(')');
    out
}

fn write_access(out: &mut String, layout: &UnionLayout<'_>, expr: &AccessExpr) {
    match expr {
        AccessExpr::Field(path) => out.push_str(&render_path(layout, path)),
        AccessExpr::Narrow { ty, inner } => {
            let _ = write!(out, "({ty})");
            write_access(out, layout, inner);
        }
        AccessExpr::Record { ty, members } | AccessExpr::Grouping { ty, members } => {
            let _ = write!(out, "new {ty}(");
            write_list(out, layout, members);
            out.push(')');
        }
        AccessExpr::Tuple(members) => {
            out.push('(');
            write_list(out, layout, members);
            out.push(')');
        }
        AccessExpr::Singleton { ty, accessor } => {
            let _ = write!(out, "{ty}.{accessor}");
        }
    }
}

fn write_list(out: &mut String, layout: &UnionLayout<'_>, members: &[AccessExpr]) {
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_access(out, layout, member);
    }
}

fn write_init(out: &mut String, layout: &UnionLayout<'_>, init: &InitExpr<'_>) {
    match init {
        InitExpr::Arg(path) => out.push_str(&arg(path)),
        InitExpr::Default => out.push_str("default"),
        InitExpr::Overlap { field, arg: path } => {
            let _ = write!(
                out,
                "new {OVERLAP_TYPE_NAME} {{ {} = {} }}",
                layout.field(*field).name,
                arg(path)
            );
        }
        InitExpr::Region { region, fields } => {
            let region = layout.field(*region);
            let _ = write!(
                out,
                "new {OVERLAP_TYPE_NAME} {{ {} = new {} {{ ",
                region.name, region.type_name
            );
            for (i, (field, path)) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{} = {}", layout.field(*field).name, arg(path));
            }
            out.push_str(" } }");
        }
    }
}

fn arg(path: &ArgPath<'_>) -> String {
    path.join(".")
}
