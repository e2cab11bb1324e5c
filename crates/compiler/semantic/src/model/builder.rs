//! # Symbol Model Builder
//!
//! Turns [`ModelDecl`] declarations into a [`SymbolModel`]: names become arena
//! ids, `override` and constructor-initializer targets are bound, variable
//! references inside local functions are tied to their declaring scope, and
//! every type's ancestor list and interface closure are computed once.

use chumsky::span::SimpleSpan;
use index_vec::IndexVec;
use indexmap::IndexSet;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use thiserror::Error;
use tracing::debug;

use super::decl::{
    CreationDecl, InstantiationDecl, LocalFunctionDecl, MemberDecl, MemberDeclKind, ModelDecl,
    ParamDecl, ReferenceDecl, TypeDecl, TypeParamDecl,
};
use super::layout::{self, Layout, LocalFunctionSpans, MemberSpans};
use super::type_syntax::{TypeSyntax, TypeSyntaxError};
use super::{
    Accessibility, Accessor, ConstructorInitializer, ConstructorInitializerKind,
    DeclarationScope, GenericInstantiation, InitializerEntry, LocalFunction, Member, MemberId,
    MemberKind, Modifier, ModifierList, ObjectCreation, Parameter, Reference, ReferenceKind,
    SourceFile, SpecialType, Spanned, SymbolModel, TypeDef, TypeId, TypeKind, TypeOrigin,
    TypeParam, TypeParamOwner, TypeParamRef, TypeRef, WellKnownTypes,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("type '{0}' is declared more than once")]
    DuplicateType(String),
    #[error("unknown type '{0}'")]
    UnknownType(String),
    #[error("'{name}' expects {expected} type arguments, found {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    TypeSyntax(#[from] TypeSyntaxError),
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
    #[error("inheritance cycle through '{0}'")]
    InheritanceCycle(String),
    #[error("'{type_name}' has no member named '{member}'")]
    UnknownMember { type_name: String, member: String },
    #[error("'{type_name}' has no constructor taking {argument_count} arguments")]
    NoMatchingConstructor {
        type_name: String,
        argument_count: usize,
    },
    #[error("'{type_name}' has no copy constructor")]
    NoCopyConstructor { type_name: String },
    #[error("'{0}' cannot be instantiated with `new`")]
    NotCreatable(String),
    #[error("'{name}' is not declared in any scope enclosing local function '{function}'")]
    UnknownVariable { name: String, function: String },
    #[error("'{generic}' has no type parameter named '{param}'")]
    UnknownTypeParameter { generic: String, param: String },
    #[error("'{member}' declares local function '{function}' but has no body")]
    LocalFunctionWithoutBody { member: String, function: String },
}

/// Collects declarations and resolves them into a [`SymbolModel`].
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    decl: ModelDecl,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn from_decl(decl: ModelDecl) -> Self {
        Self { decl }
    }

    pub fn path(mut self, path: &str) -> Self {
        self.decl.path = path.to_string();
        self
    }

    pub fn add_type(mut self, ty: TypeDecl) -> Self {
        self.decl.types.push(ty);
        self
    }

    pub fn add_creation(mut self, creation: CreationDecl) -> Self {
        self.decl.creations.push(creation);
        self
    }

    pub fn add_instantiation(mut self, instantiation: InstantiationDecl) -> Self {
        self.decl.instantiations.push(instantiation);
        self
    }

    pub fn well_known(mut self, well_known: WellKnownTypes) -> Self {
        self.decl.well_known = well_known;
        self
    }

    pub fn finish(self) -> Result<SymbolModel, ModelError> {
        let mut decl = self.decl;
        synthesize_copy_constructors(&mut decl);
        let layout = layout::render(&decl);

        let model = Resolver::new(&decl, &layout)?.resolve()?;
        debug!(
            "[ModelBuilder] built model for {} with {} types",
            decl.path,
            model.type_count()
        );
        Ok(model)
    }
}

fn is_copy_constructor(member: &MemberDecl, record: &str) -> bool {
    matches!(
        &member.kind,
        MemberDeclKind::Constructor { parameters, .. }
            if parameters.len() == 1 && parameters[0].ty == record
    )
}

fn synthesize_copy_constructors(decl: &mut ModelDecl) {
    for ty in decl
        .types
        .iter_mut()
        .filter(|ty| ty.kind == TypeKind::Record)
    {
        if !ty.members.iter().any(|m| is_copy_constructor(m, &ty.name)) {
            ty.members
                .push(MemberDecl::synthesized_copy_constructor(&ty.name));
        }
    }
}

fn resolve_modifiers(
    keywords: &[String],
    spans: &[SimpleSpan<usize>],
) -> Result<ModifierList, ModelError> {
    let entries = keywords
        .iter()
        .zip(spans)
        .map(|(keyword, span)| {
            keyword
                .parse::<Modifier>()
                .map(|m| Spanned::new(m, *span))
                .map_err(ModelError::UnknownModifier)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ModifierList::new(entries))
}

/// Type parameters visible while resolving a signature.
#[derive(Clone, Copy, Default)]
struct TypeScope<'d> {
    ty: Option<(TypeId, &'d [TypeParamDecl])>,
    method: Option<(MemberId, &'d [TypeParamDecl])>,
}

struct Frame<'d> {
    scope: DeclarationScope,
    names: Vec<(&'d str, bool)>,
}

struct Resolver<'d> {
    decl: &'d ModelDecl,
    layout: &'d Layout,
    type_ids: FxHashMap<&'d str, TypeId>,
    types: IndexVec<TypeId, TypeDef>,
    members: IndexVec<MemberId, Member>,
}

impl<'d> Resolver<'d> {
    fn new(decl: &'d ModelDecl, layout: &'d Layout) -> Result<Self, ModelError> {
        let mut type_ids = FxHashMap::default();
        for (index, ty) in decl.types.iter().enumerate() {
            if type_ids
                .insert(ty.name.as_str(), TypeId::from_usize(index))
                .is_some()
            {
                return Err(ModelError::DuplicateType(ty.name.clone()));
            }
        }
        Ok(Self {
            decl,
            layout,
            type_ids,
            types: IndexVec::with_capacity(decl.types.len()),
            members: IndexVec::new(),
        })
    }

    fn resolve(mut self) -> Result<SymbolModel, ModelError> {
        let decl = self.decl;
        let layout = self.layout;
        for (index, ty) in decl.types.iter().enumerate() {
            let def = self.resolve_type_def(TypeId::from_usize(index), ty)?;
            self.types.push(def);
        }

        let base_chains = self.base_chains()?;
        let interface_closures = self.interface_closures(&base_chains);
        self.bind_overrides(&base_chains);
        self.bind_constructor_initializers(&base_chains)?;

        let creations = decl
            .creations
            .iter()
            .zip(&layout.creations)
            .map(|(creation, spans)| {
                self.resolve_creation(creation, spans.location, &spans.entries, &base_chains)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let instantiations = decl
            .instantiations
            .iter()
            .zip(&layout.instantiations)
            .map(|(instantiation, span)| self.resolve_instantiation(instantiation, *span))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SymbolModel {
            source: SourceFile {
                path: decl.path.clone(),
                text: layout.text.clone(),
            },
            types: self.types,
            members: self.members,
            creations,
            instantiations,
            well_known: decl.well_known,
            base_chains,
            interface_closures,
        })
    }

    fn lookup_type(&self, name: &str) -> Result<TypeId, ModelError> {
        self.type_ids
            .get(name)
            .copied()
            .ok_or_else(|| ModelError::UnknownType(name.to_string()))
    }

    fn resolve_type(&self, text: &str, scope: TypeScope<'_>) -> Result<TypeRef, ModelError> {
        let syntax: TypeSyntax = text.parse()?;
        self.lower(&syntax, scope)
    }

    fn lower(&self, syntax: &TypeSyntax, scope: TypeScope<'_>) -> Result<TypeRef, ModelError> {
        let (name, args) = match syntax {
            TypeSyntax::Nullable(inner) => {
                return Ok(TypeRef::Nullable(Box::new(self.lower(inner, scope)?)));
            }
            TypeSyntax::Array(inner) => {
                return Ok(TypeRef::Array(Box::new(self.lower(inner, scope)?)));
            }
            TypeSyntax::Named { name, args } => (name, args),
        };

        if args.is_empty() {
            if name == "void" {
                return Ok(TypeRef::Void);
            }
            if let Some(special) = SpecialType::from_keyword(name) {
                return Ok(TypeRef::Special(special));
            }
            if let Some((method, params)) = scope.method {
                if let Some(index) = params.iter().position(|p| p.name == name.as_str()) {
                    return Ok(TypeRef::TypeParameter(TypeParamRef {
                        owner: TypeParamOwner::Method(method),
                        index,
                    }));
                }
            }
            if let Some((ty, params)) = scope.ty {
                if let Some(index) = params.iter().position(|p| p.name == name.as_str()) {
                    return Ok(TypeRef::TypeParameter(TypeParamRef {
                        owner: TypeParamOwner::Type(ty),
                        index,
                    }));
                }
            }
        }

        let id = self.lookup_type(name)?;
        let expected = self.decl.types[id.index()].type_params.len();
        if expected != args.len() {
            return Err(ModelError::ArityMismatch {
                name: name.to_string(),
                expected,
                found: args.len(),
            });
        }
        let args = args
            .iter()
            .map(|arg| self.lower(arg, scope))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TypeRef::Named { id, args })
    }

    fn resolve_type_params(
        &self,
        params: &[TypeParamDecl],
        scope: TypeScope<'_>,
    ) -> Result<Vec<TypeParam>, ModelError> {
        params
            .iter()
            .map(|param| {
                let constraints = param
                    .constraints
                    .iter()
                    .map(|c| self.resolve_type(c, scope))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TypeParam {
                    name: SmolStr::new(&param.name),
                    variance: param.variance,
                    constraints,
                    has_new_constraint: param.new_constraint,
                })
            })
            .collect()
    }

    fn resolve_parameters(
        &self,
        params: &[ParamDecl],
        scope: TypeScope<'_>,
    ) -> Result<Vec<Parameter>, ModelError> {
        params
            .iter()
            .map(|param| {
                Ok(Parameter {
                    name: SmolStr::new(&param.name),
                    ty: self.resolve_type(&param.ty, scope)?,
                    ref_kind: param.ref_kind,
                })
            })
            .collect()
    }

    fn resolve_type_def(&mut self, id: TypeId, decl: &'d TypeDecl) -> Result<TypeDef, ModelError> {
        let layout = self.layout;
        let spans = &layout.types[id.index()];
        let modifiers = resolve_modifiers(&decl.modifiers, &spans.modifiers)?;
        let containing_type = decl
            .containing_type
            .as_deref()
            .map(|name| self.lookup_type(name))
            .transpose()?;
        let accessibility = modifiers.declared_accessibility().unwrap_or_else(|| {
            let in_interface = decl.containing_type.as_deref().is_some_and(|name| {
                self.decl
                    .types
                    .iter()
                    .any(|t| t.name == name && t.kind.is_interface())
            });
            match (containing_type, in_interface) {
                (None, _) => Accessibility::Internal,
                (Some(_), true) => Accessibility::Public,
                (Some(_), false) => Accessibility::Private,
            }
        });

        let scope = TypeScope {
            ty: Some((id, &decl.type_params)),
            method: None,
        };
        let type_params = self.resolve_type_params(&decl.type_params, scope)?;

        let mut base = None;
        let mut interfaces = Vec::new();
        if let Some(text) = &decl.base {
            let resolved = self.resolve_type(text, scope)?;
            if decl.kind.is_interface() {
                interfaces.push(resolved);
            } else {
                base = Some(resolved);
            }
        }
        for text in &decl.interfaces {
            interfaces.push(self.resolve_type(text, scope)?);
        }

        let mut members = Vec::with_capacity(decl.members.len());
        for (member, member_spans) in decl.members.iter().zip(&spans.members) {
            let member = self.resolve_member(id, decl, member, member_spans)?;
            members.push(self.members.push(member));
        }

        Ok(TypeDef {
            name: SmolStr::new(&decl.name),
            kind: decl.kind,
            modifiers,
            accessibility,
            containing_type,
            type_params,
            base,
            interfaces,
            members,
            origin: decl
                .metadata
                .map_or(TypeOrigin::Source, TypeOrigin::Metadata),
            name_span: spans.name,
        })
    }

    fn resolve_member(
        &self,
        owner: TypeId,
        type_decl: &'d TypeDecl,
        decl: &'d MemberDecl,
        spans: &MemberSpans,
    ) -> Result<Member, ModelError> {
        let id = MemberId::from_usize(self.members.len());
        let method_params: &[TypeParamDecl] = match &decl.kind {
            MemberDeclKind::Method { type_params, .. } => type_params,
            _ => &[],
        };
        let scope = TypeScope {
            ty: Some((owner, &type_decl.type_params)),
            method: Some((id, method_params)),
        };

        let kind = match &decl.kind {
            MemberDeclKind::Field { ty } => MemberKind::Field {
                ty: self.resolve_type(ty, scope)?,
            },
            MemberDeclKind::Property {
                ty,
                is_ref,
                parameters,
                accessors,
            } => {
                let accessors = accessors
                    .iter()
                    .zip(&spans.accessors)
                    .map(|(accessor, spans)| {
                        Ok(Accessor {
                            kind: accessor.kind,
                            modifiers: resolve_modifiers(&accessor.modifiers, &spans.modifiers)?,
                            span: spans.keyword,
                        })
                    })
                    .collect::<Result<Vec<_>, ModelError>>()?;
                MemberKind::Property {
                    ty: self.resolve_type(ty, scope)?,
                    is_ref: *is_ref,
                    parameters: self.resolve_parameters(parameters, scope)?,
                    accessors,
                }
            }
            MemberDeclKind::Method {
                return_type,
                is_ref_return,
                parameters,
                type_params,
                has_body,
            } => MemberKind::Method {
                return_type: self.resolve_type(return_type, scope)?,
                is_ref_return: *is_ref_return,
                parameters: self.resolve_parameters(parameters, scope)?,
                type_params: self.resolve_type_params(type_params, scope)?,
                has_body: *has_body,
            },
            MemberDeclKind::Constructor {
                parameters,
                has_body,
                sets_required_members,
                initializer,
                synthesized_copy,
            } => MemberKind::Constructor {
                parameters: self.resolve_parameters(parameters, scope)?,
                has_body: *has_body,
                sets_required_members: *sets_required_members,
                // Targets are bound once every member exists.
                initializer: initializer
                    .as_ref()
                    .zip(spans.initializer)
                    .map(|(init, span)| ConstructorInitializer {
                        kind: init.kind,
                        target: None,
                        span,
                    }),
                is_synthesized_copy: *synthesized_copy,
            },
            MemberDeclKind::Destructor { has_body } => MemberKind::Destructor {
                has_body: *has_body,
            },
            MemberDeclKind::Event { ty, .. } => MemberKind::Event {
                ty: self.resolve_type(ty, scope)?,
                accessor_list: spans.accessor_list,
            },
            MemberDeclKind::Operator {
                token,
                return_type,
                parameters,
                has_body,
            } => MemberKind::Operator {
                token: *token,
                parameters: self.resolve_parameters(parameters, scope)?,
                return_type: self.resolve_type(return_type, scope)?,
                has_body: *has_body,
            },
            MemberDeclKind::Conversion {
                is_explicit,
                return_type,
                parameters,
                has_body,
            } => MemberKind::Conversion {
                is_explicit: *is_explicit,
                parameters: self.resolve_parameters(parameters, scope)?,
                return_type: self.resolve_type(return_type, scope)?,
                has_body: *has_body,
            },
        };

        Ok(Member {
            name: SmolStr::new(&decl.name),
            containing_type: owner,
            modifiers: resolve_modifiers(&decl.modifiers, &spans.modifiers)?,
            name_span: spans.name,
            kind,
            overridden: None,
            local_functions: self.resolve_local_functions(decl, &spans.local_functions)?,
        })
    }

    fn resolve_local_functions(
        &self,
        member: &'d MemberDecl,
        spans: &[LocalFunctionSpans],
    ) -> Result<Vec<LocalFunction>, ModelError> {
        // Only bodies are laid out with their local functions.
        if let (Some(function), true) = (member.local_functions.first(), spans.is_empty()) {
            return Err(ModelError::LocalFunctionWithoutBody {
                member: member.name.clone(),
                function: function.name.clone(),
            });
        }

        let mut names: Vec<(&str, bool)> = match &member.kind {
            MemberDeclKind::Property { parameters, .. }
            | MemberDeclKind::Method { parameters, .. }
            | MemberDeclKind::Constructor { parameters, .. }
            | MemberDeclKind::Operator { parameters, .. }
            | MemberDeclKind::Conversion { parameters, .. } => {
                parameters.iter().map(|p| (p.name.as_str(), false)).collect()
            }
            _ => Vec::new(),
        };
        names.extend(member.locals.iter().map(|l| (l.name.as_str(), l.is_const)));

        let mut frames = vec![Frame {
            scope: DeclarationScope::Member,
            names,
        }];
        let mut counter = 0;
        member
            .local_functions
            .iter()
            .map(|function| {
                self.resolve_local_function(function, spans, &mut frames, &mut counter)
            })
            .collect()
    }

    fn resolve_local_function(
        &self,
        decl: &'d LocalFunctionDecl,
        spans: &[LocalFunctionSpans],
        frames: &mut Vec<Frame<'d>>,
        counter: &mut usize,
    ) -> Result<LocalFunction, ModelError> {
        let index = *counter;
        *counter += 1;
        let own_spans = &spans[index];

        let mut names: Vec<(&str, bool)> =
            decl.parameters.iter().map(|p| (p.as_str(), false)).collect();
        names.extend(decl.locals.iter().map(|l| (l.name.as_str(), l.is_const)));
        frames.push(Frame {
            scope: DeclarationScope::LocalFunction(index),
            names,
        });

        let mut references = Vec::with_capacity(decl.references.len());
        for (reference, span) in decl.references.iter().zip(&own_spans.references) {
            let kind = match reference {
                ReferenceDecl::This => ReferenceKind::This,
                ReferenceDecl::Base => ReferenceKind::Base,
                ReferenceDecl::Member(name) => ReferenceKind::ImplicitThis {
                    member: SmolStr::new(name),
                },
                ReferenceDecl::Variable(name) => {
                    let (scope, is_const) = frames
                        .iter()
                        .rev()
                        .find_map(|frame| {
                            frame
                                .names
                                .iter()
                                .find(|(declared, _)| *declared == name.as_str())
                                .map(|(_, is_const)| (frame.scope, *is_const))
                        })
                        .ok_or_else(|| ModelError::UnknownVariable {
                            name: name.clone(),
                            function: decl.name.clone(),
                        })?;
                    ReferenceKind::Variable {
                        name: SmolStr::new(name),
                        declared_in: scope,
                        is_const,
                    }
                }
            };
            references.push(Reference { kind, span: *span });
        }

        let nested = decl
            .nested
            .iter()
            .map(|nested| self.resolve_local_function(nested, spans, frames, counter))
            .collect::<Result<Vec<_>, _>>()?;
        frames.pop();

        Ok(LocalFunction {
            index,
            name: SmolStr::new(&decl.name),
            name_span: own_spans.name,
            modifiers: resolve_modifiers(&decl.modifiers, &own_spans.modifiers)?,
            references,
            nested,
        })
    }

    /// Base classes of every type, most-base first
    fn base_chains(&self) -> Result<IndexVec<TypeId, Vec<TypeId>>, ModelError> {
        let mut chains = IndexVec::with_capacity(self.types.len());
        for (id, ty) in self.types.iter_enumerated() {
            let mut chain = Vec::new();
            let mut seen = FxHashSet::default();
            seen.insert(id);
            let mut current = ty.base.as_ref().and_then(TypeRef::named_id);
            while let Some(base) = current {
                if !seen.insert(base) {
                    return Err(ModelError::InheritanceCycle(ty.name.to_string()));
                }
                chain.push(base);
                current = self.types[base].base.as_ref().and_then(TypeRef::named_id);
            }
            chain.reverse();
            chains.push(chain);
        }
        Ok(chains)
    }

    fn interface_closures(
        &self,
        base_chains: &IndexVec<TypeId, Vec<TypeId>>,
    ) -> IndexVec<TypeId, Vec<TypeId>> {
        self.types
            .indices()
            .map(|id| {
                let mut closure = IndexSet::new();
                let mut worklist: Vec<TypeId> = std::iter::once(id)
                    .chain(base_chains[id].iter().rev().copied())
                    .flat_map(|t| self.types[t].interfaces.iter().filter_map(TypeRef::named_id))
                    .collect();
                worklist.reverse();
                while let Some(interface) = worklist.pop() {
                    if interface == id || !closure.insert(interface) {
                        continue;
                    }
                    worklist.extend(
                        self.types[interface]
                            .interfaces
                            .iter()
                            .rev()
                            .filter_map(TypeRef::named_id),
                    );
                }
                closure.into_iter().collect()
            })
            .collect()
    }

    fn bind_overrides(&mut self, base_chains: &IndexVec<TypeId, Vec<TypeId>>) {
        let mut bindings = Vec::new();
        for (id, member) in self.members.iter_enumerated() {
            if !member.modifiers.contains(Modifier::Override) {
                continue;
            }
            let target = base_chains[member.containing_type]
                .iter()
                .rev()
                .flat_map(|base| self.types[*base].members.iter().copied())
                .find(|candidate| {
                    let candidate = &self.members[*candidate];
                    candidate.name == member.name
                        && !candidate.is_static()
                        && std::mem::discriminant(&candidate.kind)
                            == std::mem::discriminant(&member.kind)
                });
            bindings.push((id, target));
        }
        for (id, target) in bindings {
            self.members[id].overridden = target;
        }
    }

    /// Pick the constructor of `ty` taking `argument_count` arguments.
    ///
    /// `Ok(None)` is the implicit parameterless constructor of a type that
    /// declares none.
    fn select_constructor(
        &self,
        ty: TypeId,
        argument_count: usize,
        except: Option<MemberId>,
    ) -> Result<Option<MemberId>, ModelError> {
        let mut declared_any = false;
        for id in &self.types[ty].members {
            let member = &self.members[*id];
            let MemberKind::Constructor {
                parameters,
                is_synthesized_copy,
                ..
            } = &member.kind
            else {
                continue;
            };
            if member.is_static() || Some(*id) == except {
                continue;
            }
            if parameters.len() == argument_count {
                return Ok(Some(*id));
            }
            declared_any |= !is_synthesized_copy;
        }
        if argument_count == 0 && (!declared_any || self.types[ty].kind.is_value_type()) {
            Ok(None)
        } else {
            Err(ModelError::NoMatchingConstructor {
                type_name: self.types[ty].name.to_string(),
                argument_count,
            })
        }
    }

    fn bind_constructor_initializers(
        &mut self,
        base_chains: &IndexVec<TypeId, Vec<TypeId>>,
    ) -> Result<(), ModelError> {
        let mut bindings = Vec::new();
        for (type_index, ty) in self.decl.types.iter().enumerate() {
            let owner = TypeId::from_usize(type_index);
            for (member_decl, id) in ty.members.iter().zip(&self.types[owner].members) {
                let MemberDeclKind::Constructor {
                    initializer: Some(initializer),
                    ..
                } = &member_decl.kind
                else {
                    continue;
                };
                let target = match initializer.kind {
                    ConstructorInitializerKind::This => {
                        self.select_constructor(owner, initializer.argument_count, Some(*id))?
                    }
                    ConstructorInitializerKind::Base => match base_chains[owner].last() {
                        Some(base) => {
                            self.select_constructor(*base, initializer.argument_count, None)?
                        }
                        None => None,
                    },
                };
                bindings.push((*id, target));
            }
        }
        for (id, target) in bindings {
            if let MemberKind::Constructor {
                initializer: Some(initializer),
                ..
            } = &mut self.members[id].kind
            {
                initializer.target = target;
            }
        }
        Ok(())
    }

    fn resolve_creation(
        &self,
        decl: &CreationDecl,
        location: SimpleSpan<usize>,
        entry_spans: &[SimpleSpan<usize>],
        base_chains: &IndexVec<TypeId, Vec<TypeId>>,
    ) -> Result<ObjectCreation, ModelError> {
        let created = self.resolve_type(&decl.ty, TypeScope::default())?;
        let Some(id) = created.named_id() else {
            return Err(ModelError::NotCreatable(decl.ty.clone()));
        };
        let def = &self.types[id];
        if def.kind.is_interface() {
            return Err(ModelError::NotCreatable(decl.ty.clone()));
        }

        let constructor = if decl.copy {
            let copy = def.members.iter().copied().find(|member| {
                let member = &self.members[*member];
                member.is_constructor()
                    && matches!(
                        member.parameters(),
                        [param] if param.ty.named_id() == Some(id)
                    )
            });
            Some(copy.ok_or_else(|| ModelError::NoCopyConstructor {
                type_name: def.name.to_string(),
            })?)
        } else {
            self.select_constructor(id, decl.argument_count, None)?
        };

        let initializers = decl
            .initializers
            .iter()
            .zip(entry_spans)
            .map(|(entry, span)| {
                let member = std::iter::once(id)
                    .chain(base_chains[id].iter().rev().copied())
                    .flat_map(|t| self.types[t].members.iter().copied())
                    .find(|m| self.members[*m].name == entry.member)
                    .ok_or_else(|| ModelError::UnknownMember {
                        type_name: def.name.to_string(),
                        member: entry.member.clone(),
                    })?;
                Ok(InitializerEntry {
                    member,
                    kind: entry.kind,
                    span: *span,
                })
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        Ok(ObjectCreation {
            created,
            constructor,
            initializers,
            location,
            target_typed: decl.target_typed,
        })
    }

    fn resolve_instantiation(
        &self,
        decl: &InstantiationDecl,
        span: SimpleSpan<usize>,
    ) -> Result<GenericInstantiation, ModelError> {
        let unknown_param = || ModelError::UnknownTypeParameter {
            generic: decl.generic.clone(),
            param: decl.type_param.clone(),
        };

        let type_param = match decl.generic.rsplit_once('.') {
            Some((type_name, method_name)) => {
                let owner = self.lookup_type(type_name)?;
                let (method, params) = self.types[owner]
                    .members
                    .iter()
                    .find_map(|id| match &self.members[*id].kind {
                        MemberKind::Method { type_params, .. }
                            if self.members[*id].name == method_name =>
                        {
                            Some((*id, type_params))
                        }
                        _ => None,
                    })
                    .ok_or_else(|| ModelError::UnknownMember {
                        type_name: type_name.to_string(),
                        member: method_name.to_string(),
                    })?;
                let index = params
                    .iter()
                    .position(|p| p.name == decl.type_param)
                    .ok_or_else(unknown_param)?;
                TypeParamRef {
                    owner: TypeParamOwner::Method(method),
                    index,
                }
            }
            None => {
                let owner = self.lookup_type(&decl.generic)?;
                let index = self.types[owner]
                    .type_params
                    .iter()
                    .position(|p| p.name == decl.type_param)
                    .ok_or_else(unknown_param)?;
                TypeParamRef {
                    owner: TypeParamOwner::Type(owner),
                    index,
                }
            }
        };

        Ok(GenericInstantiation {
            type_param,
            argument: self.resolve_type(&decl.argument, TypeScope::default())?,
            span,
        })
    }
}
