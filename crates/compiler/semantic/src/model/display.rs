//! Names of types and members as they appear in diagnostic messages.
//!
//! `I1.M01()`, `I1<T>.P`, `C.operator +(C, C)`, `C.implicit operator int(C)`.

use super::{MemberId, MemberKind, SymbolModel, TypeId, TypeParamOwner, TypeRef};

impl SymbolModel {
    pub fn display_type(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Void => "void".to_string(),
            TypeRef::Special(special) => special.keyword().to_string(),
            TypeRef::Named { id, args } => {
                let mut out = self.qualified_name(*id);
                if !args.is_empty() {
                    let args: Vec<String> = args.iter().map(|a| self.display_type(a)).collect();
                    out.push('<');
                    out.push_str(&args.join(", "));
                    out.push('>');
                }
                out
            }
            TypeRef::TypeParameter(param) => self
                .type_param(*param)
                .map(|p| p.name.to_string())
                .unwrap_or_else(|| "?".to_string()),
            TypeRef::Nullable(inner) => format!("{}?", self.display_type(inner)),
            TypeRef::Array(inner) => format!("{}[]", self.display_type(inner)),
        }
    }

    fn qualified_name(&self, id: TypeId) -> String {
        let ty = self.ty(id);
        match ty.containing_type {
            Some(container) => format!("{}.{}", self.display_type_def(container), ty.name),
            None => ty.name.to_string(),
        }
    }

    /// The type as declared, with its own type parameters: `I1<T>`
    pub fn display_type_def(&self, id: TypeId) -> String {
        let mut out = self.qualified_name(id);
        let params = &self.ty(id).type_params;
        if !params.is_empty() {
            let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
            out.push('<');
            out.push_str(&names.join(", "));
            out.push('>');
        }
        out
    }

    /// The generic type or method a type parameter belongs to
    pub fn display_type_param_owner(&self, owner: TypeParamOwner) -> String {
        match owner {
            TypeParamOwner::Type(ty) => self.display_type_def(ty),
            TypeParamOwner::Method(method) => self.display_member(method),
        }
    }

    fn display_parameters(&self, id: MemberId) -> String {
        self.member(id)
            .parameters()
            .iter()
            .map(|p| match p.ref_kind.keyword() {
                Some(keyword) => format!("{keyword} {}", self.display_type(&p.ty)),
                None => self.display_type(&p.ty),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn display_member(&self, id: MemberId) -> String {
        let member = self.member(id);
        let container = self.display_type_def(member.containing_type);
        let type_name = &self.ty(member.containing_type).name;
        let params = self.display_parameters(id);

        match &member.kind {
            MemberKind::Field { .. } | MemberKind::Event { .. } => {
                format!("{container}.{}", member.name)
            }
            MemberKind::Property { parameters, .. } if !parameters.is_empty() => {
                format!("{container}.this[{params}]")
            }
            MemberKind::Property { .. } => format!("{container}.{}", member.name),
            MemberKind::Method { type_params, .. } => {
                let generics = if type_params.is_empty() {
                    String::new()
                } else {
                    let names: Vec<&str> = type_params.iter().map(|p| p.name.as_str()).collect();
                    format!("<{}>", names.join(", "))
                };
                format!("{container}.{}{generics}({params})", member.name)
            }
            MemberKind::Constructor { .. } => format!("{container}.{type_name}({params})"),
            MemberKind::Destructor { .. } => format!("{container}.~{type_name}()"),
            MemberKind::Operator { token, .. } => {
                format!("{container}.operator {}({params})", token.symbol())
            }
            MemberKind::Conversion {
                is_explicit,
                return_type,
                ..
            } => {
                let keyword = if *is_explicit { "explicit" } else { "implicit" };
                format!(
                    "{container}.{keyword} operator {}({params})",
                    self.display_type(return_type)
                )
            }
        }
    }
}
