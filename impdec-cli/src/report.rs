//! Plain-text rendering of a scan.
use impdec::{ImportDescriptor, ImportEntry, Limits, Section};
use std::io::{self, Write};

/// Writes the import listing. `total` is the number of imports in the
/// module; when `filter` is set, `imports` holds only the matching ones and
/// their count is printed on a line of its own.
pub fn write_imports<W: Write>(
    out: &mut W,
    total: usize,
    imports: &[&ImportEntry],
    filter: Option<&str>,
) -> io::Result<()> {
    writeln!(out, "Total imports: {total}")?;
    if let Some(module) = filter {
        writeln!(out, "Matching imports ({module}): {}", imports.len())?;
    }
    for import in imports {
        writeln!(
            out,
            "IMPORT: {}.{} ({})",
            import.module,
            import.name,
            describe(&import.desc)
        )?;
    }
    Ok(())
}

pub fn write_sections<W: Write>(out: &mut W, sections: &[Section]) -> io::Result<()> {
    for section in sections {
        let kind = match section.kind() {
            Some(kind) => format!("{kind:?}"),
            None => "unknown".to_owned(),
        };
        writeln!(
            out,
            "SECTION: {:>3} {kind:<9} {:#x}..{:#x} ({} bytes)",
            section.id,
            section.payload_start,
            section.payload_end,
            section.len()
        )?;
    }
    Ok(())
}

fn describe(desc: &ImportDescriptor) -> String {
    match desc {
        ImportDescriptor::Function { type_index } => format!("func[{type_index}]"),
        ImportDescriptor::Table {
            reference_type,
            limits,
        } => format!("table {reference_type:#04x} {}", describe_limits(limits)),
        ImportDescriptor::Memory { limits } => format!("memory {}", describe_limits(limits)),
        ImportDescriptor::Global {
            value_type,
            mutable,
        } => {
            let mutability = if *mutable { "mut" } else { "const" };
            format!("global {value_type:#04x} {mutability}")
        }
    }
}

fn describe_limits(limits: &Limits) -> String {
    match limits.max {
        Some(max) => format!("min={} max={max}", limits.min),
        None => format!("min={}", limits.min),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, desc: ImportDescriptor) -> ImportEntry {
        ImportEntry {
            module: "env".to_owned(),
            name: name.to_owned(),
            desc,
        }
    }

    #[test]
    fn renders_one_line_per_import() {
        let imports = [
            entry("foo", ImportDescriptor::Function { type_index: 3 }),
            entry(
                "mem",
                ImportDescriptor::Memory {
                    limits: Limits { min: 1, max: None },
                },
            ),
            entry(
                "tbl",
                ImportDescriptor::Table {
                    reference_type: 0x70,
                    limits: Limits {
                        min: 0,
                        max: Some(4),
                    },
                },
            ),
            entry(
                "sp",
                ImportDescriptor::Global {
                    value_type: 0x7f,
                    mutable: true,
                },
            ),
        ];
        let refs: Vec<&ImportEntry> = imports.iter().collect();

        let mut out = Vec::new();
        write_imports(&mut out, refs.len(), &refs, None).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Total imports: 4\n\
             IMPORT: env.foo (func[3])\n\
             IMPORT: env.mem (memory min=1)\n\
             IMPORT: env.tbl (table 0x70 min=0 max=4)\n\
             IMPORT: env.sp (global 0x7f mut)\n"
        );
    }

    #[test]
    fn filtered_listing_keeps_the_module_total() {
        let foo = entry("foo", ImportDescriptor::Function { type_index: 0 });

        let mut out = Vec::new();
        write_imports(&mut out, 6, &[&foo], Some("env")).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Total imports: 6\n\
             Matching imports (env): 1\n\
             IMPORT: env.foo (func[0])\n"
        );

        let mut out = Vec::new();
        write_imports(&mut out, 6, &[], Some("nope")).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Total imports: 6\nMatching imports (nope): 0\n"
        );
    }

    #[test]
    fn renders_unknown_sections() {
        let sections = [Section {
            id: 99,
            payload_start: 10,
            payload_end: 12,
        }];

        let mut out = Vec::new();
        write_sections(&mut out, &sections).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "SECTION:  99 unknown   0xa..0xc (2 bytes)\n"
        );
    }
}
