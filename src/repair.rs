//! Heuristic repair of YAML-shaped corruption in extracted documents.
//!
//! The upstream extraction stage renders indented YAML with exactly one
//! leading space where deeper indentation is required, and sometimes invents
//! a list dash in front of a property line. The repair pass undoes both,
//! line by line, inside fenced yaml blocks and across raw document text.
//!
//! Every rule's output is a fixed point of the whole rule set, so applying
//! the pass twice changes nothing. That idempotency is a hard contract,
//! covered by property tests and a fuzz target.

use crate::config::IndentTableConfig;
use log::debug;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// One leading space, then a list dash.
static ONE_SPACE_LIST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^ -\s+(.*)$").unwrap());

/// One leading space, then `identifier: value`. Also the YAML-like shape
/// test for raw (non-fenced) lines. The identifier charset covers
/// domain-qualified keys such as `machine.openshift.io/cluster-api-machine-role`.
static ONE_SPACE_PROPERTY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ ([a-zA-Z_][a-zA-Z0-9_./-]*)(\s*:.*)$").unwrap());

/// A dash glued directly onto `key: value`, at any depth.
static GLUED_DASH_PROPERTY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)-([a-zA-Z_][a-zA-Z0-9_]*)\s*:\s*(.*)$").unwrap());

/// Double-dash corruption: `- - rest`, at any depth.
static DOUBLE_DASH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)-\s+-\s+(.*)$").unwrap());

/// A dash with a colon-free value: a continuation line the extraction stage
/// mistook for a list item.
static DASH_CONTINUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)-\s+([^:]+)$").unwrap());

/// Immutable property name -> target indent table.
///
/// Built once from [`IndentTableConfig`]; known limitation: the built-in
/// defaults are a fixture for one observed manifest schema and make no claim
/// to generality.
#[derive(Debug, Clone)]
pub struct PropertyIndentTable {
    exact: HashMap<String, usize>,
    prefixes: Vec<(String, usize)>,
    default_indent: usize,
}

impl PropertyIndentTable {
    pub fn from_config(config: &IndentTableConfig) -> Self {
        PropertyIndentTable {
            exact: config.properties.iter().map(|(k, v)| (k.clone(), *v)).collect(),
            prefixes: config.prefixes.iter().map(|(k, v)| (k.clone(), *v)).collect(),
            default_indent: config.default_indent,
        }
    }

    /// Target indent for a property name; unknown names get the default.
    pub fn lookup(&self, property: &str) -> usize {
        if let Some(&indent) = self.exact.get(property) {
            return indent;
        }
        self.prefixes
            .iter()
            .find(|(prefix, _)| property.starts_with(prefix.as_str()))
            .map(|&(_, indent)| indent)
            .unwrap_or(self.default_indent)
    }
}

impl Default for PropertyIndentTable {
    fn default() -> Self {
        Self::from_config(&IndentTableConfig::default())
    }
}

/// The repair pass itself. Holds only the read-only indent table, so one
/// instance can serve any number of documents.
#[derive(Debug, Clone, Default)]
pub struct RepairPass {
    table: PropertyIndentTable,
}

impl RepairPass {
    pub fn new(table: PropertyIndentTable) -> Self {
        RepairPass { table }
    }

    /// Repair a whole document: full per-line repair inside fenced
    /// `yaml`/`yml` blocks (closing fence may be implied by EOF), and
    /// shape-tested repair on every other line regardless of fence context.
    /// Never fails; idempotent.
    pub fn repair_document(&self, document: &str) -> String {
        let mut repaired = Vec::new();
        let mut in_yaml_block = false;

        for line in document.split('\n') {
            let trimmed = line.trim();

            if !in_yaml_block && (trimmed.starts_with("```yaml") || trimmed.starts_with("```yml")) {
                in_yaml_block = true;
                repaired.push(line.to_string());
                continue;
            }
            if in_yaml_block && trimmed == "```" {
                in_yaml_block = false;
                repaired.push(line.to_string());
                continue;
            }

            if in_yaml_block || is_yaml_like(line) {
                repaired.push(self.repair_line(line));
            } else {
                repaired.push(line.to_string());
            }
        }

        repaired.join("\n")
    }

    /// Repair one line. Rules apply in priority order; the first match wins
    /// and anything unmatched passes through unchanged.
    pub fn repair_line(&self, line: &str) -> String {
        if line.trim().is_empty() {
            return line.to_string();
        }

        // Rule 1: a list item that lost its indentation (one leading space).
        // Double-dash rests are left for rule 4 so one application converges.
        if let Some(caps) = ONE_SPACE_LIST_RE.captures(line) {
            let rest = &caps[1];
            if !rest.starts_with('-') {
                let fixed = format!("  - {rest}");
                debug!("repaired list item: {:?} -> {:?}", line, fixed);
                return fixed;
            }
        }

        // Rule 2: a property at one leading space; the indent table knows
        // where it belongs.
        if let Some(caps) = ONE_SPACE_PROPERTY_RE.captures(line) {
            let property = &caps[1];
            let indent = self.table.lookup(property);
            let fixed = format!("{}{}{}", " ".repeat(indent), property, &caps[2]);
            debug!("repaired property indent: {:?} -> {:?} ({indent} spaces)", line, fixed);
            return fixed;
        }

        // Rule 3: a property wrongly rendered as a list entry, dash glued
        // onto the key.
        if let Some(caps) = GLUED_DASH_PROPERTY_RE.captures(line) {
            let fixed = format!("{}  {}: {}", &caps[1], &caps[2], &caps[3]);
            debug!("repaired dashed property: {:?} -> {:?}", line, fixed);
            return fixed;
        }

        // Rule 4: double-dash corruption collapses to a single dash. Rests
        // that still start with a dash stay put so one application converges.
        if let Some(caps) = DOUBLE_DASH_RE.captures(line) {
            let rest = &caps[2];
            if !rest.starts_with('-') {
                let fixed = format!("{}  - {rest}", &caps[1]);
                debug!("repaired double dash: {:?} -> {:?}", line, fixed);
                return fixed;
            }
        }

        // Rule 5: a colon-free dash line at the corruption indent (zero or
        // one leading space) is a continuation value, not a list item.
        // Dash lines at two or more spaces are genuine list items.
        if let Some(caps) = DASH_CONTINUATION_RE.captures(line) {
            let leading = &caps[1];
            let value = caps[2].trim_end();
            if leading.len() <= 1 && !value.starts_with(['-', '*']) {
                let fixed = format!("{leading}    {value}");
                debug!("repaired continuation line: {:?} -> {:?}", line, fixed);
                return fixed;
            }
        }

        line.to_string()
    }
}

/// Shape test for raw (non-fenced) lines: only single-space-indented
/// property lines qualify. Dash-shaped repairs stay confined to fenced yaml
/// blocks, where the context is known.
fn is_yaml_like(line: &str) -> bool {
    ONE_SPACE_PROPERTY_RE.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pass() -> RepairPass {
        RepairPass::default()
    }

    #[test]
    fn test_rule1_list_item_reindented() {
        assert_eq!(pass().repair_line(" - status: Unknown"), "  - status: Unknown");
        assert_eq!(pass().repair_line(" - item"), "  - item");
    }

    #[test]
    fn test_rule2_property_indent_from_table() {
        let p = pass();
        assert_eq!(p.repair_line(" name: mhc"), "  name: mhc");
        assert_eq!(p.repair_line(" namespace: api"), "  namespace: api");
        assert_eq!(p.repair_line(" selector:"), "  selector:");
        assert_eq!(p.repair_line(" unhealthyConditions:"), "  unhealthyConditions:");
        assert_eq!(p.repair_line(" matchLabels:"), "    matchLabels:");
        assert_eq!(
            p.repair_line(" machine.openshift.io/cluster-api-machine-role: worker"),
            "      machine.openshift.io/cluster-api-machine-role: worker"
        );
        assert_eq!(p.repair_line(" timeout: 8m"), "    timeout: 8m");
        assert_eq!(p.repair_line(" type: Ready"), "    type: Ready");
    }

    #[test]
    fn test_rule2_unknown_property_defaults_to_two() {
        assert_eq!(pass().repair_line(" somethingElse: 1"), "  somethingElse: 1");
    }

    #[test]
    fn test_rule3_glued_dash_property() {
        assert_eq!(pass().repair_line("-maxUnhealthy: 40%"), "  maxUnhealthy: 40%");
        assert_eq!(pass().repair_line("  -replicas: 3"), "    replicas: 3");
    }

    #[test]
    fn test_rule4_double_dash_collapsed() {
        assert_eq!(pass().repair_line("- - status: Unknown"), "  - status: Unknown");
        assert_eq!(pass().repair_line("  - - item"), "    - item");
    }

    #[test]
    fn test_rule5_continuation_line() {
        assert_eq!(pass().repair_line("- someValue"), "    someValue");
    }

    #[test]
    fn test_rule5_leaves_genuine_list_items() {
        assert_eq!(pass().repair_line("  - item"), "  - item");
        assert_eq!(pass().repair_line("    - deeper"), "    - deeper");
        assert_eq!(pass().repair_line("- -flagged"), "- -flagged");
        assert_eq!(pass().repair_line("- * bullet"), "- * bullet");
    }

    #[test]
    fn test_unmatched_lines_pass_through() {
        let p = pass();
        assert_eq!(p.repair_line("  name: fine"), "  name: fine");
        assert_eq!(p.repair_line("plain text"), "plain text");
        assert_eq!(p.repair_line(""), "");
        assert_eq!(p.repair_line("   "), "   ");
    }

    #[test]
    fn test_each_rule_output_is_a_fixed_point() {
        let p = pass();
        let inputs = [
            " - status: Unknown",
            " - item",
            " name: mhc",
            " matchLabels:",
            " timeout: 8m",
            "-maxUnhealthy: 40%",
            " -glued: yes",
            "- - status: Unknown",
            " - - doubled",
            "- - - tripled",
            "- someValue",
            "  - genuine",
        ];
        for input in inputs {
            let once = p.repair_line(input);
            let twice = p.repair_line(&once);
            assert_eq!(once, twice, "repair not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_fenced_yaml_block_repaired() {
        let doc = "intro\n```yaml\nmetadata:\n name: foo\n```\noutro";
        let expected = "intro\n```yaml\nmetadata:\n  name: foo\n```\noutro";
        assert_eq!(pass().repair_document(doc), expected);
    }

    #[test]
    fn test_yml_fence_also_recognized() {
        let doc = "```yml\n name: foo\n```";
        let expected = "```yml\n  name: foo\n```";
        assert_eq!(pass().repair_document(doc), expected);
    }

    #[test]
    fn test_unclosed_yaml_block_repaired_to_eof() {
        let doc = "```yaml\n name: foo\n - status: x";
        let expected = "```yaml\n  name: foo\n  - status: x";
        assert_eq!(pass().repair_document(doc), expected);
    }

    #[test]
    fn test_raw_line_shape_test() {
        // Single-space property lines are repaired even outside fences.
        assert_eq!(pass().repair_document(" timeout: 8m"), "    timeout: 8m");
        // Dash-shaped lines in prose are not.
        assert_eq!(pass().repair_document(" - just a bullet"), " - just a bullet");
    }

    #[test]
    fn test_other_fences_only_get_shape_repairs() {
        let doc = "```bash\n - not yaml\n```";
        assert_eq!(pass().repair_document(doc), doc);
    }

    #[test]
    fn test_full_corrupted_manifest() {
        let doc = "\
```yaml
apiVersion: machine.openshift.io/v1beta1
kind: MachineHealthCheck
metadata:
 name: example
 namespace: openshift-machine-api
spec:
 selector:
 matchLabels:
 machine.openshift.io/cluster-api-machine-role: worker
 unhealthyConditions:
 - type: Ready
 - status: Unknown
 timeout: 8m
```";
        let expected = "\
```yaml
apiVersion: machine.openshift.io/v1beta1
kind: MachineHealthCheck
metadata:
  name: example
  namespace: openshift-machine-api
spec:
  selector:
    matchLabels:
      machine.openshift.io/cluster-api-machine-role: worker
  unhealthyConditions:
  - type: Ready
  - status: Unknown
    timeout: 8m
```";
        assert_eq!(pass().repair_document(doc), expected);
    }

    #[test]
    fn test_repair_document_idempotent() {
        let doc = "```yaml\n name: a\n - x: y\n-glued: z\n```\n timeout: 1s\nprose";
        let once = pass().repair_document(doc);
        let twice = pass().repair_document(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_custom_indent_table() {
        let mut config = IndentTableConfig::default();
        config.properties.insert("replicas".to_string(), 6);
        let p = RepairPass::new(PropertyIndentTable::from_config(&config));
        assert_eq!(p.repair_line(" replicas: 3"), "      replicas: 3");
    }
}
