//! Variable references contained in HCL expressions
//!
//! Walks an [`hcl::Expression`] and returns every traversal rooted at a
//! variable (`aws_instance.web.id`, `var.ami`, `module.net["a"]`, ...) as an
//! ordered list of path segments.

use hcl::expr::{Expression, ObjectKey, Operation, TemplateExpr, Traversal, TraversalOperator};
use hcl::template::{Directive, Element, Template};

/// Key of an index access inside a traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexKey {
    /// A literal string key, e.g. `["primary"]`
    String(String),
    /// Any other index: numbers, expressions, legacy `.0` indexes
    Other,
}

/// One component of a variable traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Root(String),
    Attr(String),
    Index(IndexKey),
}

/// A traversal rooted at a variable, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariablePath {
    segments: Vec<PathSegment>,
}

impl VariablePath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

/// Collect the variable traversals of an expression.
///
/// Iteration variables of `for` expressions and template `for` directives
/// are scoped out.
pub fn collect_variables(expr: &Expression) -> Vec<VariablePath> {
    let mut collector = VariableCollector::default();
    collector.expression(expr);
    collector.found
}

#[derive(Default)]
struct VariableCollector {
    scoped: Vec<String>,
    found: Vec<VariablePath>,
}

impl VariableCollector {
    fn is_scoped(&self, name: &str) -> bool {
        self.scoped.iter().any(|scoped| scoped == name)
    }

    fn push_root(&mut self, name: &str, mut rest: Vec<PathSegment>) {
        if self.is_scoped(name) {
            return;
        }
        let mut segments = Vec::with_capacity(rest.len() + 1);
        segments.push(PathSegment::Root(name.to_string()));
        segments.append(&mut rest);
        self.found.push(VariablePath::new(segments));
    }

    fn expression(&mut self, expr: &Expression) {
        match expr {
            Expression::Variable(variable) => self.push_root(variable.as_str(), Vec::new()),
            Expression::Traversal(traversal) => self.traversal(traversal),
            Expression::Array(items) => {
                for item in items {
                    self.expression(item);
                }
            }
            Expression::Object(object) => {
                for (key, value) in object.iter() {
                    if let ObjectKey::Expression(key_expr) = key {
                        self.expression(key_expr);
                    }
                    self.expression(value);
                }
            }
            Expression::TemplateExpr(template) => self.template_expr(template),
            Expression::FuncCall(call) => {
                for arg in &call.args {
                    self.expression(arg);
                }
            }
            Expression::Parenthesis(inner) => self.expression(inner),
            Expression::Conditional(cond) => {
                self.expression(&cond.cond_expr);
                self.expression(&cond.true_expr);
                self.expression(&cond.false_expr);
            }
            Expression::Operation(operation) => self.operation(operation),
            Expression::ForExpr(for_expr) => {
                self.expression(&for_expr.collection_expr);

                let scope_len = self.scoped.len();
                if let Some(key_var) = &for_expr.key_var {
                    self.scoped.push(key_var.as_str().to_string());
                }
                self.scoped.push(for_expr.value_var.as_str().to_string());

                if let Some(key_expr) = &for_expr.key_expr {
                    self.expression(key_expr);
                }
                self.expression(&for_expr.value_expr);
                if let Some(cond_expr) = &for_expr.cond_expr {
                    self.expression(cond_expr);
                }

                self.scoped.truncate(scope_len);
            }
            _ => {}
        }
    }

    fn operation(&mut self, operation: &Operation) {
        match operation {
            Operation::Unary(unary) => self.expression(&unary.expr),
            Operation::Binary(binary) => {
                self.expression(&binary.lhs_expr);
                self.expression(&binary.rhs_expr);
            }
        }
    }

    fn traversal(&mut self, traversal: &Traversal) {
        let Expression::Variable(root) = &traversal.expr else {
            // e.g. `element(list, 0).id`: only the inner expression matters
            self.expression(&traversal.expr);
            for operator in &traversal.operators {
                if let TraversalOperator::Index(index) = operator {
                    self.expression(index);
                }
            }
            return;
        };

        let mut rest = Vec::new();
        let mut in_path = true;
        for operator in &traversal.operators {
            match operator {
                TraversalOperator::GetAttr(name) => {
                    if in_path {
                        rest.push(PathSegment::Attr(name.as_str().to_string()));
                    }
                }
                TraversalOperator::Index(index) => {
                    if in_path {
                        let key = match literal_string(index) {
                            Some(key) => IndexKey::String(key),
                            None => IndexKey::Other,
                        };
                        rest.push(PathSegment::Index(key));
                    }
                    self.expression(index);
                }
                TraversalOperator::LegacyIndex(_) => {
                    if in_path {
                        rest.push(PathSegment::Index(IndexKey::Other));
                    }
                }
                // `[*]` and `.*` end the static part of the path
                _ => in_path = false,
            }
        }

        self.push_root(root.as_str(), rest);
    }

    fn template_expr(&mut self, template_expr: &TemplateExpr) {
        if let Ok(template) = Template::from_expr(template_expr) {
            self.template(&template);
        }
    }

    fn template(&mut self, template: &Template) {
        for element in template.elements() {
            match element {
                Element::Interpolation(interpolation) => self.expression(&interpolation.expr),
                Element::Directive(directive) => self.directive(directive),
                _ => {}
            }
        }
    }

    fn directive(&mut self, directive: &Directive) {
        match directive {
            Directive::If(if_directive) => {
                self.expression(&if_directive.cond_expr);
                self.template(&if_directive.true_template);
                if let Some(false_template) = &if_directive.false_template {
                    self.template(false_template);
                }
            }
            Directive::For(for_directive) => {
                self.expression(&for_directive.collection_expr);

                let scope_len = self.scoped.len();
                if let Some(key_var) = &for_directive.key_var {
                    self.scoped.push(key_var.as_str().to_string());
                }
                self.scoped.push(for_directive.value_var.as_str().to_string());
                self.template(&for_directive.template);
                self.scoped.truncate(scope_len);
            }
        }
    }
}

/// The value of an expression that is a plain string literal
fn literal_string(expr: &Expression) -> Option<String> {
    match expr {
        Expression::String(value) => Some(value.clone()),
        Expression::TemplateExpr(template_expr) => {
            let template = Template::from_expr(template_expr).ok()?;
            let mut value = String::new();
            for element in template.elements() {
                match element {
                    Element::Literal(literal) => value.push_str(literal),
                    _ => return None,
                }
            }
            Some(value)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths_of(source: &str) -> Vec<Vec<PathSegment>> {
        let body = hcl::parse(source).unwrap();
        let attr = body.attributes().next().unwrap();
        collect_variables(attr.expr())
            .into_iter()
            .map(|path| path.segments().to_vec())
            .collect()
    }

    fn root(name: &str) -> PathSegment {
        PathSegment::Root(name.to_string())
    }

    fn attr(name: &str) -> PathSegment {
        PathSegment::Attr(name.to_string())
    }

    #[test]
    fn test_plain_traversal() {
        assert_eq!(
            paths_of("x = aws_instance.web.id"),
            vec![vec![root("aws_instance"), attr("web"), attr("id")]]
        );
    }

    #[test]
    fn test_index_keys() {
        assert_eq!(
            paths_of(r#"x = module.net["primary"].id"#),
            vec![vec![
                root("module"),
                attr("net"),
                PathSegment::Index(IndexKey::String("primary".to_string())),
                attr("id"),
            ]]
        );
        assert_eq!(
            paths_of("x = aws_subnet.a[0].id"),
            vec![vec![
                root("aws_subnet"),
                attr("a"),
                PathSegment::Index(IndexKey::Other),
                attr("id"),
            ]]
        );
    }

    #[test]
    fn test_index_expression_contributes_its_own_variables() {
        let paths = paths_of("x = aws_subnet.a[var.index].id");
        assert_eq!(paths.len(), 2);
        assert!(paths.contains(&vec![root("var"), attr("index")]));
    }

    #[test]
    fn test_template_interpolation() {
        assert_eq!(
            paths_of(r#"x = "${var.prefix}-${aws_vpc.main.id}""#),
            vec![
                vec![root("var"), attr("prefix")],
                vec![root("aws_vpc"), attr("main"), attr("id")],
            ]
        );
    }

    #[test]
    fn test_nested_expressions() {
        let paths = paths_of(
            r#"x = var.enabled ? merge(local.tags, { Name = data.aws_ami.latest.name }) : []"#,
        );
        assert_eq!(
            paths,
            vec![
                vec![root("var"), attr("enabled")],
                vec![root("local"), attr("tags")],
                vec![root("data"), attr("aws_ami"), attr("latest"), attr("name")],
            ]
        );
    }

    #[test]
    fn test_for_expression_scopes_iteration_variables() {
        let paths = paths_of("x = [for s in aws_subnet.all : s.id if s.public]");
        assert_eq!(paths, vec![vec![root("aws_subnet"), attr("all")]]);
    }

    #[test]
    fn test_splat_ends_path() {
        assert_eq!(
            paths_of("x = aws_instance.web[*].id"),
            vec![vec![root("aws_instance"), attr("web")]]
        );
    }

    #[test]
    fn test_literals_have_no_variables() {
        assert!(paths_of(r#"x = "plain""#).is_empty());
        assert!(paths_of("x = 42").is_empty());
    }
}
