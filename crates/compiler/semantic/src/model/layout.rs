//! Renders declarations as C#-like text and records where each piece landed.
//!
//! Diagnostics point at the modifier keyword, member name, operator token or
//! `new` expression they are about, so the text produced here is what the
//! reporter underlines.

use chumsky::span::SimpleSpan;

use super::decl::{
    CreationDecl, InstantiationDecl, LocalDecl, LocalFunctionDecl, MemberDecl, MemberDeclKind,
    ModelDecl, ParamDecl, ReferenceDecl, TypeDecl,
};
use super::{ConstructorInitializerKind, InitializerEntryKind, MetadataRequiredMembers};

const INDENT: &str = "    ";

#[derive(Debug, Clone)]
pub(crate) struct AccessorSpans {
    pub keyword: SimpleSpan<usize>,
    pub modifiers: Vec<SimpleSpan<usize>>,
}

#[derive(Debug, Clone)]
pub(crate) struct LocalFunctionSpans {
    pub name: SimpleSpan<usize>,
    pub modifiers: Vec<SimpleSpan<usize>>,
    pub references: Vec<SimpleSpan<usize>>,
}

#[derive(Debug, Clone)]
pub(crate) struct MemberSpans {
    pub name: SimpleSpan<usize>,
    pub modifiers: Vec<SimpleSpan<usize>>,
    pub accessors: Vec<AccessorSpans>,
    pub accessor_list: Option<SimpleSpan<usize>>,
    pub initializer: Option<SimpleSpan<usize>>,
    /// Preorder over the member's local function tree
    pub local_functions: Vec<LocalFunctionSpans>,
}

impl Default for MemberSpans {
    fn default() -> Self {
        Self {
            name: SimpleSpan::from(0..0),
            modifiers: Vec::new(),
            accessors: Vec::new(),
            accessor_list: None,
            initializer: None,
            local_functions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct TypeSpans {
    pub name: SimpleSpan<usize>,
    pub modifiers: Vec<SimpleSpan<usize>>,
    pub members: Vec<MemberSpans>,
}

#[derive(Debug, Clone)]
pub(crate) struct CreationSpans {
    pub location: SimpleSpan<usize>,
    pub entries: Vec<SimpleSpan<usize>>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Layout {
    pub text: String,
    pub types: Vec<TypeSpans>,
    pub creations: Vec<CreationSpans>,
    pub instantiations: Vec<SimpleSpan<usize>>,
}

#[derive(Default)]
struct SourceWriter {
    text: String,
}

impl SourceWriter {
    fn push(&mut self, s: &str) -> SimpleSpan<usize> {
        let start = self.text.len();
        self.text.push_str(s);
        SimpleSpan::from(start..self.text.len())
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.text.push_str(INDENT);
        }
    }

    fn newline(&mut self) {
        self.text.push('\n');
    }

    fn modifiers(&mut self, keywords: &[String]) -> Vec<SimpleSpan<usize>> {
        keywords
            .iter()
            .map(|keyword| {
                let span = self.push(keyword);
                self.push(" ");
                span
            })
            .collect()
    }

    fn parameters(&mut self, parameters: &[ParamDecl]) {
        for (i, param) in parameters.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            if let Some(keyword) = param.ref_kind.keyword() {
                self.push(keyword);
                self.push(" ");
            }
            self.push(&param.ty);
            self.push(" ");
            self.push(&param.name);
        }
    }

    fn locals(&mut self, locals: &[LocalDecl], depth: usize) {
        for local in locals {
            self.indent(depth);
            if local.is_const {
                self.push("const int ");
                self.push(&local.name);
                self.push(" = 0;");
            } else {
                self.push("var ");
                self.push(&local.name);
                self.push(" = default;");
            }
            self.newline();
        }
    }
}

pub(crate) fn render(decl: &ModelDecl) -> Layout {
    let mut writer = SourceWriter::default();
    let types = decl
        .types
        .iter()
        .map(|ty| render_type(&mut writer, ty))
        .collect();
    let creations = decl
        .creations
        .iter()
        .enumerate()
        .map(|(i, creation)| render_creation(&mut writer, creation, i))
        .collect();
    let instantiations = decl
        .instantiations
        .iter()
        .map(|instantiation| render_instantiation(&mut writer, instantiation))
        .collect();

    Layout {
        text: writer.text,
        types,
        creations,
        instantiations,
    }
}

fn render_type(writer: &mut SourceWriter, ty: &TypeDecl) -> TypeSpans {
    match ty.metadata {
        Some(MetadataRequiredMembers::WellFormed) => {
            writer.push("// from metadata");
            writer.newline();
        }
        Some(MetadataRequiredMembers::Malformed) => {
            writer.push("// from metadata, required member list is malformed");
            writer.newline();
        }
        None => {}
    }
    if let Some(container) = &ty.containing_type {
        writer.push("// nested in ");
        writer.push(container);
        writer.newline();
    }

    let modifiers = writer.modifiers(&ty.modifiers);
    writer.push(ty.kind.keyword());
    writer.push(" ");
    let name = writer.push(&ty.name);
    if !ty.type_params.is_empty() {
        writer.push("<");
        for (i, param) in ty.type_params.iter().enumerate() {
            if i > 0 {
                writer.push(", ");
            }
            if let Some(keyword) = param.variance.keyword() {
                writer.push(keyword);
                writer.push(" ");
            }
            writer.push(&param.name);
        }
        writer.push(">");
    }
    let supertypes: Vec<&str> = ty
        .base
        .iter()
        .chain(ty.interfaces.iter())
        .map(String::as_str)
        .collect();
    if !supertypes.is_empty() {
        writer.push(" : ");
        writer.push(&supertypes.join(", "));
    }
    for param in ty.type_params.iter().chain(
        ty.members
            .iter()
            .filter_map(|m| match &m.kind {
                MemberDeclKind::Method { type_params, .. } => Some(type_params),
                _ => None,
            })
            .flatten(),
    ) {
        if param.constraints.is_empty() && !param.new_constraint {
            continue;
        }
        let mut clauses: Vec<&str> = param.constraints.iter().map(String::as_str).collect();
        if param.new_constraint {
            clauses.push("new()");
        }
        writer.newline();
        writer.indent(1);
        writer.push("where ");
        writer.push(&param.name);
        writer.push(" : ");
        writer.push(&clauses.join(", "));
    }
    writer.newline();
    writer.push("{");
    writer.newline();

    let members = ty
        .members
        .iter()
        .map(|member| render_member(writer, member, &ty.name))
        .collect();

    writer.push("}");
    writer.newline();
    writer.newline();

    TypeSpans {
        name,
        modifiers,
        members,
    }
}

fn render_member(writer: &mut SourceWriter, member: &MemberDecl, type_name: &str) -> MemberSpans {
    let mut spans = MemberSpans::default();
    writer.indent(1);
    spans.modifiers = writer.modifiers(&member.modifiers);

    let has_body = match &member.kind {
        MemberDeclKind::Field { ty } => {
            writer.push(ty);
            writer.push(" ");
            spans.name = writer.push(&member.name);
            writer.push(";");
            None
        }
        MemberDeclKind::Property {
            ty,
            is_ref,
            parameters,
            accessors,
        } => {
            if *is_ref {
                writer.push("ref ");
            }
            writer.push(ty);
            writer.push(" ");
            if parameters.is_empty() {
                spans.name = writer.push(&member.name);
            } else {
                spans.name = writer.push("this");
                writer.push("[");
                writer.parameters(parameters);
                writer.push("]");
            }
            writer.push(" {");
            for accessor in accessors {
                writer.push(" ");
                let modifiers = writer.modifiers(&accessor.modifiers);
                let keyword = writer.push(accessor.kind.keyword());
                writer.push(";");
                spans.accessors.push(AccessorSpans { keyword, modifiers });
            }
            writer.push(" }");
            None
        }
        MemberDeclKind::Method {
            return_type,
            is_ref_return,
            parameters,
            type_params,
            has_body,
        } => {
            if *is_ref_return {
                writer.push("ref ");
            }
            writer.push(return_type);
            writer.push(" ");
            spans.name = writer.push(&member.name);
            if !type_params.is_empty() {
                let names: Vec<&str> = type_params.iter().map(|p| p.name.as_str()).collect();
                writer.push("<");
                writer.push(&names.join(", "));
                writer.push(">");
            }
            writer.push("(");
            writer.parameters(parameters);
            writer.push(")");
            Some(*has_body)
        }
        MemberDeclKind::Constructor {
            parameters,
            has_body,
            initializer,
            ..
        } => {
            spans.name = writer.push(type_name);
            writer.push("(");
            writer.parameters(parameters);
            writer.push(")");
            if let Some(initializer) = initializer {
                writer.push(" : ");
                let keyword = match initializer.kind {
                    ConstructorInitializerKind::This => "this",
                    ConstructorInitializerKind::Base => "base",
                };
                let args = vec!["default"; initializer.argument_count].join(", ");
                spans.initializer = Some(writer.push(&format!("{keyword}({args})")));
            }
            Some(*has_body)
        }
        MemberDeclKind::Destructor { has_body } => {
            writer.push("~");
            spans.name = writer.push(type_name);
            writer.push("()");
            Some(*has_body)
        }
        MemberDeclKind::Event { ty, has_accessors } => {
            writer.push("event ");
            writer.push(ty);
            writer.push(" ");
            spans.name = writer.push(&member.name);
            if *has_accessors {
                writer.push(" ");
                spans.accessor_list = Some(writer.push("{"));
                writer.push(" add { } remove { } }");
            } else {
                writer.push(";");
            }
            None
        }
        MemberDeclKind::Operator {
            token,
            return_type,
            parameters,
            has_body,
        } => {
            writer.push(return_type);
            writer.push(" operator ");
            spans.name = writer.push(token.symbol());
            writer.push("(");
            writer.parameters(parameters);
            writer.push(")");
            Some(*has_body)
        }
        MemberDeclKind::Conversion {
            is_explicit,
            return_type,
            parameters,
            has_body,
        } => {
            writer.push(if *is_explicit { "explicit" } else { "implicit" });
            writer.push(" operator ");
            spans.name = writer.push(return_type);
            writer.push("(");
            writer.parameters(parameters);
            writer.push(")");
            Some(*has_body)
        }
    };

    match has_body {
        Some(true) => render_body(writer, member, &mut spans),
        Some(false) => {
            writer.push(";");
        }
        None => {}
    }
    writer.newline();
    spans
}

fn render_body(writer: &mut SourceWriter, member: &MemberDecl, spans: &mut MemberSpans) {
    if member.locals.is_empty() && member.local_functions.is_empty() {
        writer.push(" { }");
        return;
    }
    writer.newline();
    writer.indent(1);
    writer.push("{");
    writer.newline();
    writer.locals(&member.locals, 2);
    for function in &member.local_functions {
        render_local_function(writer, function, 2, &mut spans.local_functions);
    }
    writer.indent(1);
    writer.push("}");
}

fn render_local_function(
    writer: &mut SourceWriter,
    function: &LocalFunctionDecl,
    depth: usize,
    out: &mut Vec<LocalFunctionSpans>,
) {
    writer.indent(depth);
    let modifiers = writer.modifiers(&function.modifiers);
    writer.push("void ");
    let name = writer.push(&function.name);
    writer.push("(");
    let params: Vec<String> = function
        .parameters
        .iter()
        .map(|p| format!("int {p}"))
        .collect();
    writer.push(&params.join(", "));
    writer.push(")");
    writer.newline();
    writer.indent(depth);
    writer.push("{");
    writer.newline();

    let slot = out.len();
    out.push(LocalFunctionSpans {
        name,
        modifiers,
        references: Vec::new(),
    });

    writer.locals(&function.locals, depth + 1);
    for reference in &function.references {
        writer.indent(depth + 1);
        let text = match reference {
            ReferenceDecl::This => "this",
            ReferenceDecl::Base => "base",
            ReferenceDecl::Member(name) | ReferenceDecl::Variable(name) => name.as_str(),
        };
        if matches!(reference, ReferenceDecl::Base) {
            let span = writer.push(text);
            writer.push(".ToString();");
            out[slot].references.push(span);
        } else {
            writer.push("_ = ");
            let span = writer.push(text);
            writer.push(";");
            out[slot].references.push(span);
        }
        writer.newline();
    }
    for nested in &function.nested {
        render_local_function(writer, nested, depth + 1, out);
    }

    writer.indent(depth);
    writer.push("}");
    writer.newline();
}

fn render_creation(writer: &mut SourceWriter, creation: &CreationDecl, index: usize) -> CreationSpans {
    let args = if creation.copy {
        "original".to_string()
    } else {
        vec!["default"; creation.argument_count].join(", ")
    };

    let location = if creation.target_typed {
        writer.push(&creation.ty);
        writer.push(&format!(" value{index} = "));
        let span = writer.push("new");
        writer.push(&format!("({args})"));
        span
    } else {
        writer.push("_ = new ");
        let span = writer.push(&creation.ty);
        writer.push(&format!("({args})"));
        span
    };

    let mut entries = Vec::with_capacity(creation.initializers.len());
    if !creation.initializers.is_empty() {
        writer.push(" {");
        for (i, entry) in creation.initializers.iter().enumerate() {
            writer.push(if i == 0 { " " } else { ", " });
            entries.push(writer.push(&entry.member));
            writer.push(match entry.kind {
                InitializerEntryKind::Assignment => " = default",
                InitializerEntryKind::NestedInitializer => " = { }",
                InitializerEntryKind::NewWithInitializer => " = new() { }",
            });
        }
        writer.push(" }");
    }
    writer.push(";");
    writer.newline();

    CreationSpans { location, entries }
}

fn render_instantiation(writer: &mut SourceWriter, instantiation: &InstantiationDecl) -> SimpleSpan<usize> {
    if instantiation.generic.contains('.') {
        writer.push(&instantiation.generic);
        writer.push("<");
        let span = writer.push(&instantiation.argument);
        writer.push(">();");
        writer.newline();
        span
    } else {
        writer.push("_ = typeof(");
        writer.push(&instantiation.generic);
        writer.push("<");
        let span = writer.push(&instantiation.argument);
        writer.push(">);");
        writer.newline();
        span
    }
}
