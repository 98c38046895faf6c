//! Renders records as ninja text.

use super::{
    escape::{escape_command_part, escape_path, escape_value},
    record::{BuildEdge, NinjaRecord, RuleDefinition},
};
use std::fmt;
use std::io::{self, Write};

impl fmt::Display for RuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rule {}", self.name)?;
        // Every word, the program included, is written with a leading space,
        // which is where the double space after `command =` comes from.
        write!(f, "  command = ")?;
        for part in &self.command {
            write!(f, " {}", escape_command_part(part))?;
        }
        writeln!(f)?;
        writeln!(f, "  description = {}", escape_value(&self.description))?;
        if self.restat {
            writeln!(f, "  restat = 1")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for BuildEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "build")?;
        for output in &self.outputs {
            write!(f, " {}", escape_path(output.value()))?;
        }
        write!(f, ": {}", self.rule)?;
        for input in &self.explicit_inputs {
            write!(f, " {}", escape_path(input.value()))?;
        }
        if !self.implicit_inputs.is_empty() {
            write!(f, " |")?;
            for input in &self.implicit_inputs {
                write!(f, " {}", escape_path(input.value()))?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for NinjaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule(rule) => fmt::Display::fmt(rule, f),
            Self::Build(edge) => fmt::Display::fmt(edge, f),
        }
    }
}

/// Writes [`NinjaRecord`]s in the order given, one statement at a time.
#[derive(Debug)]
pub struct NinjaWriter<W> {
    out: W,
}

impl<W: Write> NinjaWriter<W> {
    /// Wraps a sink.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Writes every record in order.
    pub fn write_records<'a, I>(&mut self, records: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a NinjaRecord>,
    {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Writes one record.
    pub fn write_record(&mut self, record: &NinjaRecord) -> io::Result<()> {
        write!(self.out, "{record}")
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Renders records into a string.
pub fn render(records: &[NinjaRecord]) -> String {
    records.iter().map(NinjaRecord::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{ninja::PHONY, paths::OutputFile};
    use pretty_assertions::assert_eq;

    fn files(paths: &[&str]) -> Vec<OutputFile> {
        paths.iter().map(|p| OutputFile::new(*p)).collect()
    }

    #[test]
    fn test_copy_edge() {
        let edge = BuildEdge::new(files(&["bar.bundle/Resources/input1.txt"]), "copy_bundle_data")
            .explicit(files(&["../../foo/input1.txt"]));
        assert_eq!(
            render(&[edge.into()]),
            "build bar.bundle/Resources/input1.txt: copy_bundle_data ../../foo/input1.txt\n"
        );
    }

    #[test]
    fn test_edge_with_implicit_inputs_only() {
        let edge = BuildEdge::new(files(&["a", "b"]), "sign").implicit(files(&["s.stamp"]));
        assert_eq!(render(&[edge.into()]), "build a b: sign | s.stamp\n");
    }

    #[test]
    fn test_stamp_without_inputs() {
        let edge = BuildEdge::new(files(&["obj/baz/bar.stamp"]), "stamp");
        assert_eq!(render(&[edge.into()]), "build obj/baz/bar.stamp: stamp\n");
    }

    #[test]
    fn test_rule_block() {
        let rule = RuleDefinition {
            name: "__baz_bar_code_signing_rule".into(),
            command: vec!["../../build/codesign.py".into(), "bar.bundle".into()],
            description: "CODE SIGNING //baz:bar".into(),
            restat: true,
        };
        let phony = BuildEdge::new(files(&["bar.bundle"]), PHONY).explicit(files(&["x.stamp"]));
        assert_eq!(
            render(&[rule.into(), phony.into()]),
            "rule __baz_bar_code_signing_rule\n\
             \x20 command =  ../../build/codesign.py bar.bundle\n\
             \x20 description = CODE SIGNING //baz:bar\n\
             \x20 restat = 1\n\
             \n\
             build bar.bundle: phony x.stamp\n"
        );
    }

    #[test]
    fn test_writer_matches_render() {
        let records: Vec<NinjaRecord> = vec![
            BuildEdge::new(files(&["a"]), "stamp").into(),
            BuildEdge::new(files(&["b"]), PHONY).explicit(files(&["a"])).into(),
        ];
        let mut writer = NinjaWriter::new(Vec::new());
        writer.write_records(&records).unwrap();
        assert_eq!(
            String::from_utf8(writer.into_inner()).unwrap(),
            render(&records)
        );
    }

    #[test]
    fn test_paths_are_escaped() {
        let edge = BuildEdge::new(files(&["bar.bundle/Plug Ins/x"]), "copy_bundle_data")
            .explicit(files(&["../../a b"]));
        assert_eq!(
            render(&[edge.into()]),
            "build bar.bundle/Plug$ Ins/x: copy_bundle_data ../../a$ b\n"
        );
    }
}
