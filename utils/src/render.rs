use colored::Colorize;
use plan_defs::{DiffNode, DiffReport, PathSegment, StackDiffResult, TemplateDocument};

/// Prefix of the summary line closing every rendered report.
pub const DIFF_COUNT_PREFIX: &str = "✨  Number of stacks with differences: ";

pub const NO_DIFFERENCES: &str = "There were no differences";

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Leave out stacks without differences entirely
    pub quiet: bool,
    pub color: bool,
}

/// Renders every stack of the report in order, followed by the count of
/// stacks with differences.
pub fn render_report(report: &DiffReport, options: &RenderOptions) -> String {
    let mut printer = DiffPrinter::new(options.color);

    for result in report.results() {
        if options.quiet && !result.has_differences {
            continue;
        }
        printer.stack(result);
    }

    printer.line(String::new());
    printer.line(format!(
        "{}{}",
        DIFF_COUNT_PREFIX,
        report.stacks_with_differences()
    ));
    printer.finish()
}

/// Reads the count back from rendered output.
pub fn parse_diff_count(rendered: &str) -> Option<usize> {
    rendered
        .lines()
        .rev()
        .find_map(|line| line.strip_prefix(DIFF_COUNT_PREFIX))
        .and_then(|count| count.trim().parse().ok())
}

#[derive(Clone, Copy)]
enum Sign {
    Added,
    Removed,
    Changed,
}

struct DiffPrinter {
    color: bool,
    out: String,
}

impl DiffPrinter {
    fn new(color: bool) -> Self {
        DiffPrinter {
            color,
            out: String::new(),
        }
    }

    fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, text: String) {
        self.out.push_str(&text);
        self.out.push('\n');
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn sign(&self, sign: Sign) -> String {
        let (symbol, colored) = match sign {
            Sign::Added => ("[+]", "[+]".green()),
            Sign::Removed => ("[-]", "[-]".red()),
            Sign::Changed => ("[~]", "[~]".yellow()),
        };
        if self.color {
            colored.to_string()
        } else {
            symbol.to_string()
        }
    }

    fn value(&self, value: &TemplateDocument, sign: Sign) -> String {
        let text = value.to_string();
        if !self.color {
            return text;
        }
        match sign {
            Sign::Added => text.green().to_string(),
            Sign::Removed => text.red().to_string(),
            Sign::Changed => text,
        }
    }

    fn stack(&mut self, result: &StackDiffResult) {
        self.line(self.bold(&format!("Stack {}", result.stack_name)));

        if !result.has_differences {
            self.line(NO_DIFFERENCES.to_string());
        } else {
            self.template(&result.diff);
        }
        self.line(String::new());
    }

    fn template(&mut self, diff: &DiffNode) {
        match diff {
            DiffNode::Nested(_) => {
                for (segment, node) in diff.changed_children() {
                    self.section(segment, node);
                }
            }
            DiffNode::Added(TemplateDocument::Mapping(sections)) if sections.is_empty() => {
                self.line(format!("{} Added: Template", self.sign(Sign::Added)))
            }
            DiffNode::Removed(TemplateDocument::Mapping(sections)) if sections.is_empty() => {
                self.line(format!("{} Removed: Template", self.sign(Sign::Removed)))
            }
            // Never deployed (or about to be deleted): every section at once
            DiffNode::Added(TemplateDocument::Mapping(sections)) => {
                for (key, value) in sections {
                    self.section(&PathSegment::Key(key.clone()), &DiffNode::Added(value.clone()));
                }
            }
            DiffNode::Removed(TemplateDocument::Mapping(sections)) => {
                for (key, value) in sections {
                    self.section(
                        &PathSegment::Key(key.clone()),
                        &DiffNode::Removed(value.clone()),
                    );
                }
            }
            other => self.entry(&PathSegment::from("Template"), other),
        }
    }

    /// A top-level key of the template. Mapping sections such as `Resources`
    /// get a title line and one entry per changed member.
    fn section(&mut self, key: &PathSegment, node: &DiffNode) {
        match node {
            DiffNode::Nested(_) => {
                self.line(self.bold(&key.to_string()));
                for (segment, member) in node.changed_children() {
                    self.entry(segment, member);
                }
            }
            DiffNode::Added(TemplateDocument::Mapping(members)) if !members.is_empty() => {
                self.line(self.bold(&key.to_string()));
                for (name, value) in members {
                    self.whole_entry(&PathSegment::Key(name.clone()), value, Sign::Added);
                }
            }
            DiffNode::Removed(TemplateDocument::Mapping(members)) if !members.is_empty() => {
                self.line(self.bold(&key.to_string()));
                for (name, value) in members {
                    self.whole_entry(&PathSegment::Key(name.clone()), value, Sign::Removed);
                }
            }
            other => self.entry(key, other),
        }
    }

    fn whole_entry(&mut self, key: &PathSegment, value: &TemplateDocument, sign: Sign) {
        if value.is_scalar() {
            self.line(format!(
                "{} {}: {}",
                self.sign(sign),
                key,
                self.value(value, sign)
            ));
        } else {
            self.line(format!("{} {}", self.sign(sign), entry_label(key, declared_type(value))));
        }
    }

    /// One member of a section, e.g. a resource, with its property changes
    /// drawn as a tree below it.
    fn entry(&mut self, key: &PathSegment, node: &DiffNode) {
        match node {
            DiffNode::Unchanged(_) => {}
            DiffNode::Added(value) => self.whole_entry(key, value, Sign::Added),
            DiffNode::Removed(value) => self.whole_entry(key, value, Sign::Removed),
            DiffNode::Changed { old, new } => {
                self.line(format!(
                    "{} {}",
                    self.sign(Sign::Changed),
                    entry_label(key, declared_type(new))
                ));
                self.value_change(" ", old, new);
            }
            DiffNode::Nested(_) => {
                self.line(format!(
                    "{} {}",
                    self.sign(Sign::Changed),
                    entry_label(key, nested_type(node))
                ));
                let children = node.changed_children();
                let last_index = children.len().saturating_sub(1);
                for (index, (segment, child)) in children.into_iter().enumerate() {
                    self.property(segment, child, 1, " ", index == last_index);
                }
            }
        }
    }

    fn property(
        &mut self,
        segment: &PathSegment,
        node: &DiffNode,
        depth: usize,
        indent: &str,
        last: bool,
    ) {
        let connector = if last { "└─ " } else { "├─ " };
        let prefix = format!("{}{}", indent, connector);
        let child_indent = format!("{}{}", indent, if last { "    " } else { "│   " });
        let name = property_name(segment, depth);
        let colon = if depth > 1 { ":" } else { "" };

        match node {
            DiffNode::Unchanged(_) => {}
            DiffNode::Added(value) if value.is_scalar() => self.line(format!(
                "{}{} {}: {}",
                prefix,
                self.sign(Sign::Added),
                name,
                self.value(value, Sign::Added)
            )),
            DiffNode::Added(_) => {
                self.line(format!("{}{} Added: {}", prefix, self.sign(Sign::Added), name))
            }
            DiffNode::Removed(value) if value.is_scalar() => self.line(format!(
                "{}{} {}: {}",
                prefix,
                self.sign(Sign::Removed),
                name,
                self.value(value, Sign::Removed)
            )),
            DiffNode::Removed(_) => self.line(format!(
                "{}{} Removed: {}",
                prefix,
                self.sign(Sign::Removed),
                name
            )),
            DiffNode::Changed { old, new } => {
                self.line(format!(
                    "{}{} {}{}",
                    prefix,
                    self.sign(Sign::Changed),
                    name,
                    colon
                ));
                self.value_change(&child_indent, old, new);
            }
            DiffNode::Nested(_) => {
                self.line(format!(
                    "{}{} {}{}",
                    prefix,
                    self.sign(Sign::Changed),
                    name,
                    colon
                ));
                let children = node.changed_children();
                let last_index = children.len().saturating_sub(1);
                for (index, (segment, child)) in children.into_iter().enumerate() {
                    self.property(segment, child, depth + 1, &child_indent, index == last_index);
                }
            }
        }
    }

    fn value_change(&mut self, indent: &str, old: &TemplateDocument, new: &TemplateDocument) {
        self.line(format!(
            "{}├─ {} {}",
            indent,
            self.sign(Sign::Removed),
            self.value(old, Sign::Removed)
        ));
        self.line(format!(
            "{}└─ {} {}",
            indent,
            self.sign(Sign::Added),
            self.value(new, Sign::Added)
        ));
    }
}

// Direct properties print bare, deeper keys as `.Key`
fn property_name(segment: &PathSegment, depth: usize) -> String {
    match segment {
        PathSegment::Key(key) if depth > 1 => format!(".{}", key),
        other => other.to_string(),
    }
}

fn entry_label(key: &PathSegment, resource_type: Option<&str>) -> String {
    match resource_type {
        Some(resource_type) => format!("{} {}", resource_type, key),
        None => key.to_string(),
    }
}

fn declared_type(value: &TemplateDocument) -> Option<&str> {
    value.get("Type").and_then(|t| t.as_str())
}

// The `Type` of a changed resource may itself be unchanged, changed or added
fn nested_type(node: &DiffNode) -> Option<&str> {
    let DiffNode::Nested(children) = node else {
        return None;
    };
    match children.get(&PathSegment::from("Type")) {
        Some(DiffNode::Unchanged(value))
        | Some(DiffNode::Added(value))
        | Some(DiffNode::Changed { new: value, .. }) => value.as_str(),
        _ => None,
    }
}
