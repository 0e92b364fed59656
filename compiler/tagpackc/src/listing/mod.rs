//! Human-readable plan listing.

use std::io::{self, Write};

use tagpack_layout::{
    render_access, render_construction, PlanEmitter, UnionLayout, UnionPlan, ValueId,
};

/// Writes one listing per plan: the storage fields, then every case with
/// its tag, construction and access.
pub struct PlanListing<W> {
    out: W,
    /// Also print each case's value tree and where every leaf is stored.
    verbose: bool,
}

impl<W: Write> PlanListing<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        Self { out, verbose }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_fields(&mut self, plan: &UnionPlan<'_>) -> io::Result<()> {
        let layout = &plan.layout;

        if let Some(overlap) = layout.overlap {
            writeln!(self.out, "  {}", layout.field(overlap))?;
            for case in &layout.cases {
                let Some(field) = case.overlap_field else {
                    continue;
                };
                writeln!(self.out, "    {}", layout.field(field))?;
                for &inner in &case.region_fields {
                    writeln!(self.out, "      {}", layout.field(inner))?;
                }
            }
        }
        for &field in &layout.union_fields {
            writeln!(self.out, "  {}", layout.field(field))?;
        }
        Ok(())
    }

    fn write_values(
        &mut self,
        layout: &UnionLayout<'_>,
        case: &str,
        ids: &[ValueId],
        depth: usize,
    ) -> io::Result<()> {
        for &id in ids {
            let node = &layout.values[id];
            let indent = "  ".repeat(depth);
            write!(
                self.out,
                "{indent}{}: {} [{:?}]",
                node.name(),
                node.ty(),
                node.kind
            )?;
            match node.field {
                Some(field) => match layout.path_to(field, case) {
                    Ok(path) => writeln!(self.out, " -> {}", layout.path_names(&path))?,
                    Err(_) => writeln!(self.out, " -> <unplaced>")?,
                },
                None => writeln!(self.out)?,
            }
            self.write_values(layout, case, &node.members, depth + 1)?;
        }
        Ok(())
    }
}

impl<W: Write> PlanEmitter for PlanListing<W> {
    type Error = io::Error;

    fn emit(&mut self, plan: &UnionPlan<'_>) -> io::Result<()> {
        let layout = &plan.layout;
        writeln!(
            self.out,
            "union {}: {} field(s)",
            plan.union.type_name,
            layout.field_count()
        )?;
        self.write_fields(plan)?;

        for (index, case) in plan.cases.iter().enumerate() {
            writeln!(self.out, "  case {} = {}", case.case.name, case.tag)?;
            if let Some(factory) = &case.names.factory {
                writeln!(
                    self.out,
                    "    {factory}: {}",
                    render_construction(layout, &plan.names, &case.mapping.construction)
                )?;
            }
            if let Some(accessor) = &case.names.accessor {
                writeln!(
                    self.out,
                    "    {accessor}: {}",
                    render_access(layout, &plan.names, &case.mapping.access)
                )?;
            }
            if self.verbose {
                self.write_values(layout, &case.case.name, &layout.cases[index].values, 3)?;
            }
        }
        writeln!(self.out)
    }
}
