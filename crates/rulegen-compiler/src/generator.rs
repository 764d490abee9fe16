//! Rule generator session
//!
//! [`RuleGenerator`] owns the document under construction together with the
//! name allocator, attribute registry and macro cache that must stay in
//! sync with it. A session is: load the existing transfer file (optional),
//! process one or more specification documents, trim, write.

use std::path::Path;

use rulegen_domain::constants::RULE_NAME_ATTR;
use rulegen_domain::{
    FeatureSpec, LinguisticDatabase, MacroSpec, ReportSink, Result, RuleSpec, SectionKind,
    underscores,
};
use tracing::{debug, info};

use crate::attributes::AttributeRegistry;
use crate::compiler::PatternCompiler;
use crate::config::GeneratorConfig;
use crate::document::TransferDocument;
use crate::issues::CompileIssue;
use crate::macros::{MacroCache, ensure_variable};
use crate::naming::NameAllocator;
use crate::parser::{SpecDocument, SpecificationParser};
use crate::permutation;
use crate::report::CompileReport;
use crate::usage::{TrimSummary, trim_unused};

/// A compile session over one transfer document
pub struct RuleGenerator<R: ReportSink = CompileReport> {
    source_db: Box<dyn LinguisticDatabase>,
    target_db: Box<dyn LinguisticDatabase>,
    report: R,
    config: GeneratorConfig,
    document: TransferDocument,
    names: NameAllocator,
    attributes: AttributeRegistry,
    macros: MacroCache,
}

impl RuleGenerator<CompileReport> {
    /// Session with default settings and a collecting report
    pub fn new(
        source_db: Box<dyn LinguisticDatabase>,
        target_db: Box<dyn LinguisticDatabase>,
    ) -> Self {
        Self::with_report(
            source_db,
            target_db,
            CompileReport::new(),
            GeneratorConfig::default(),
        )
    }
}

impl<R: ReportSink> RuleGenerator<R> {
    pub fn with_report(
        source_db: Box<dyn LinguisticDatabase>,
        target_db: Box<dyn LinguisticDatabase>,
        report: R,
        config: GeneratorConfig,
    ) -> Self {
        let mut document = TransferDocument::new();
        if !config.doctype {
            document.set_doctype(None);
        }
        Self {
            source_db,
            target_db,
            report,
            config,
            document,
            names: NameAllocator::new(),
            attributes: AttributeRegistry::new(),
            macros: MacroCache::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn document(&self) -> &TransferDocument {
        &self.document
    }

    pub fn report(&self) -> &R {
        &self.report
    }

    pub fn report_mut(&mut self) -> &mut R {
        &mut self.report
    }

    pub fn into_report(self) -> R {
        self.report
    }

    /// Replace the session document with an existing transfer file
    ///
    /// On error the current document is left untouched.
    pub fn load_existing_transfer_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let document = TransferDocument::load(path)?;
        self.hydrate(document);
        info!(
            path = %path.display(),
            rules = self.document.len(SectionKind::Rules),
            "Loaded existing transfer file"
        );
        Ok(())
    }

    /// Replace the session document with transfer file text
    pub fn load_transfer_str(&mut self, text: &str, document: &str) -> Result<()> {
        let parsed = TransferDocument::parse(text, document)?;
        self.hydrate(parsed);
        Ok(())
    }

    fn hydrate(&mut self, document: TransferDocument) {
        self.names = NameAllocator::from_document(&document);
        self.attributes = AttributeRegistry::from_document(&document);
        self.macros = MacroCache::new();
        self.document = document;
    }

    /// Compile every rule of a specification file; returns the rules added
    pub fn process_spec_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let spec = SpecificationParser::parse_file(path)?;
        Ok(self.process_spec(&spec, &path.display().to_string()))
    }

    /// Compile every rule of specification text; returns the rules added
    pub fn process_spec_str(&mut self, text: &str, document: &str) -> Result<usize> {
        let spec = SpecificationParser::parse_str(text, document)?;
        Ok(self.process_spec(&spec, document))
    }

    /// Compile a parsed specification; returns the rules added
    ///
    /// Invalid rules are reported and skipped. Each permutation counts as
    /// one rule.
    pub fn process_spec(&mut self, spec: &SpecDocument, document: &str) -> usize {
        for issue in &spec.issues {
            self.report_issue(issue);
        }
        let permutations_default = spec
            .create_permutations
            .unwrap_or(self.config.create_permutations);

        let mut expansions: Vec<RuleSpec> = Vec::new();
        for parsed in &spec.rules {
            for issue in &parsed.issues {
                self.report_issue(issue);
            }
            if !parsed.is_valid() {
                continue;
            }
            let mut rule = parsed.rule.clone();
            rule.create_permutations = parsed.create_permutations.unwrap_or(permutations_default);
            match permutation::expand(&rule, self.config.max_permutation_words) {
                Ok(rules) => expansions.extend(rules),
                Err(issue) => self.report_issue(&issue),
            }
        }

        if spec.overwrite_rules {
            let replaced: Vec<String> = expansions.iter().map(|r| underscores(&r.name)).collect();
            self.remove_rules(&replaced);
        }

        let mut compiled = 0;
        for rule in &expansions {
            let result = PatternCompiler {
                document: &mut self.document,
                names: &mut self.names,
                attributes: &mut self.attributes,
                macros: &mut self.macros,
                source_db: self.source_db.as_ref(),
                target_db: self.target_db.as_ref(),
                disjoint: spec.disjoint_set(),
                report: &mut self.report,
            }
            .compile(rule);

            match result {
                Ok(mut element) => {
                    let name = self.names.get_available_id(SectionKind::Rules, &rule.name);
                    element
                        .attributes
                        .insert(0, (RULE_NAME_ATTR.to_string(), name.clone()));
                    self.document.add_definition(SectionKind::Rules, element);
                    debug!(rule = %name, "Compiled rule");
                    compiled += 1;
                }
                Err(issue) => self.report_issue(&issue),
            }
        }

        self.report
            .info(&format!("{document}: {compiled} rule(s) generated"));
        compiled
    }

    fn remove_rules(&mut self, names: &[String]) {
        for name in names {
            if self.document.remove_definition(SectionKind::Rules, name) > 0 {
                self.names.release(SectionKind::Rules, name);
                self.report
                    .info(&format!("Replacing existing rule '{name}'"));
            }
        }
    }

    fn report_issue(&mut self, issue: &CompileIssue) {
        self.report.record(issue.severity(), &issue.to_string());
    }

    /// Remove generated variables and macros that nothing references
    ///
    /// Removed names become available again and cached macros that were
    /// removed are synthesized anew on next use.
    pub fn trim_unused(&mut self) -> TrimSummary {
        let summary = trim_unused(&mut self.document);
        self.macros.forget(&summary.removed_macros);
        for name in &summary.removed_macros {
            self.names.release(SectionKind::Macros, name);
        }
        for name in &summary.removed_variables {
            self.names.release(SectionKind::Variables, name);
        }
        summary
    }

    /// Serialize the session document
    pub fn to_xml_string(&self) -> String {
        self.document.to_xml_string(self.config.indent)
    }

    pub fn write_transfer_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.document.write(path, self.config.indent)?;
        info!(
            path = %path.display(),
            rules = self.document.len(SectionKind::Rules),
            "Wrote transfer file"
        );
        Ok(())
    }

    /// Allocate a collision-free identifier in a namespace
    pub fn get_available_id(&mut self, kind: SectionKind, base: &str) -> String {
        self.names.get_available_id(kind, base)
    }

    /// Resolve or define the attribute for a feature
    ///
    /// An unresolvable feature is reported and yields `None`.
    pub fn ensure_attribute(&mut self, spec: &FeatureSpec) -> Option<String> {
        let db = if spec.is_source {
            self.source_db.as_ref()
        } else {
            self.target_db.as_ref()
        };
        match self
            .attributes
            .ensure_attribute(spec, db, &mut self.document, &mut self.names)
        {
            Ok(name) => Some(name),
            Err(issue) => {
                self.report_issue(&issue);
                None
            }
        }
    }

    /// Define an attribute for a value set unless an identical one exists
    pub fn add_single_attribute(
        &mut self,
        base: &str,
        values: impl IntoIterator<Item = String>,
    ) -> String {
        self.attributes.add_single_attribute(
            base,
            values.into_iter().collect(),
            &mut self.document,
            &mut self.names,
        )
    }

    /// Define a variable unless it exists; returns its name
    pub fn add_variable(&mut self, name: &str, comment: Option<&str>) -> String {
        let name = underscores(name);
        ensure_variable(&mut self.document, &mut self.names, &name, comment);
        name
    }

    /// The disjoint-feature macro, once synthesized
    pub fn disjoint_macro(&self) -> Option<&MacroSpec> {
        self.macros.disjoint_macro()
    }

    /// Rule names in document order
    pub fn rule_names(&self) -> Vec<String> {
        self.document.definition_names(SectionKind::Rules)
    }
}
