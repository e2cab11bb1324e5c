//! Declarations as handed over by a binder, before name resolution.
//!
//! These are plain serde structs so that a symbol model can be read from a
//! JSON file, with fluent constructors for building them in code. Names of
//! types are written in the compact syntax of [`super::type_syntax`];
//! modifiers are written as their keywords.

use serde::{Deserialize, Serialize};

use super::{
    AccessorKind, ConstructorInitializerKind, InitializerEntryKind, MetadataRequiredMembers,
    OperatorToken, RefKind, TypeKind, Variance, WellKnownTypes,
};

fn default_path() -> String {
    "test.cs".to_string()
}

const fn yes() -> bool {
    true
}

fn void() -> String {
    "void".to_string()
}

fn keywords(modifiers: &str) -> Vec<String> {
    modifiers.split_whitespace().map(str::to_string).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDecl {
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    #[serde(default)]
    pub creations: Vec<CreationDecl>,
    #[serde(default)]
    pub instantiations: Vec<InstantiationDecl>,
    #[serde(default)]
    pub well_known: WellKnownTypes,
}

impl Default for ModelDecl {
    fn default() -> Self {
        Self {
            path: default_path(),
            types: Vec::new(),
            creations: Vec::new(),
            instantiations: Vec::new(),
            well_known: WellKnownTypes::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParamDecl {
    pub name: String,
    #[serde(default)]
    pub variance: Variance,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub new_constraint: bool,
}

impl TypeParamDecl {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            variance: Variance::Invariant,
            constraints: Vec::new(),
            new_constraint: false,
        }
    }

    pub fn covariant(mut self) -> Self {
        self.variance = Variance::Out;
        self
    }

    pub fn contravariant(mut self) -> Self {
        self.variance = Variance::In;
        self
    }

    pub fn constraint(mut self, ty: &str) -> Self {
        self.constraints.push(ty.to_string());
        self
    }

    pub fn new_constraint(mut self) -> Self {
        self.new_constraint = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub type_params: Vec<TypeParamDecl>,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
    /// Name of the enclosing type for nested declarations
    #[serde(default)]
    pub containing_type: Option<String>,
    /// Set for types read from a referenced assembly
    #[serde(default)]
    pub metadata: Option<MetadataRequiredMembers>,
}

impl TypeDecl {
    pub fn new(kind: TypeKind, name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            modifiers: Vec::new(),
            type_params: Vec::new(),
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            containing_type: None,
            metadata: None,
        }
    }

    pub fn class(name: &str) -> Self {
        Self::new(TypeKind::Class, name)
    }

    pub fn interface(name: &str) -> Self {
        Self::new(TypeKind::Interface, name)
    }

    pub fn record(name: &str) -> Self {
        Self::new(TypeKind::Record, name)
    }

    pub fn modifiers(mut self, modifiers: &str) -> Self {
        self.modifiers = keywords(modifiers);
        self
    }

    pub fn base(mut self, base: &str) -> Self {
        self.base = Some(base.to_string());
        self
    }

    pub fn implements(mut self, interface: &str) -> Self {
        self.interfaces.push(interface.to_string());
        self
    }

    pub fn type_param(mut self, param: TypeParamDecl) -> Self {
        self.type_params.push(param);
        self
    }

    pub fn member(mut self, member: MemberDecl) -> Self {
        self.members.push(member);
        self
    }

    pub fn nested_in(mut self, container: &str) -> Self {
        self.containing_type = Some(container.to_string());
        self
    }

    pub fn from_metadata(mut self, required_members: MetadataRequiredMembers) -> Self {
        self.metadata = Some(required_members);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    pub ty: String,
    #[serde(default)]
    pub ref_kind: RefKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorDecl {
    pub kind: AccessorKind,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl AccessorDecl {
    pub fn new(kind: AccessorKind) -> Self {
        Self {
            kind,
            modifiers: Vec::new(),
        }
    }

    pub fn modifiers(mut self, modifiers: &str) -> Self {
        self.modifiers = keywords(modifiers);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializerDecl {
    pub kind: ConstructorInitializerKind,
    #[serde(default)]
    pub argument_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberDeclKind {
    Field {
        ty: String,
    },
    Property {
        ty: String,
        #[serde(default)]
        is_ref: bool,
        #[serde(default)]
        parameters: Vec<ParamDecl>,
        #[serde(default)]
        accessors: Vec<AccessorDecl>,
    },
    Method {
        #[serde(default = "void")]
        return_type: String,
        #[serde(default)]
        is_ref_return: bool,
        #[serde(default)]
        parameters: Vec<ParamDecl>,
        #[serde(default)]
        type_params: Vec<TypeParamDecl>,
        #[serde(default = "yes")]
        has_body: bool,
    },
    Constructor {
        #[serde(default)]
        parameters: Vec<ParamDecl>,
        #[serde(default = "yes")]
        has_body: bool,
        #[serde(default)]
        sets_required_members: bool,
        #[serde(default)]
        initializer: Option<InitializerDecl>,
        #[serde(skip)]
        synthesized_copy: bool,
    },
    Destructor {
        #[serde(default = "yes")]
        has_body: bool,
    },
    Event {
        ty: String,
        #[serde(default)]
        has_accessors: bool,
    },
    Operator {
        token: OperatorToken,
        return_type: String,
        #[serde(default)]
        parameters: Vec<ParamDecl>,
        #[serde(default = "yes")]
        has_body: bool,
    },
    Conversion {
        #[serde(default)]
        is_explicit: bool,
        return_type: String,
        #[serde(default)]
        parameters: Vec<ParamDecl>,
        #[serde(default = "yes")]
        has_body: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalDecl {
    pub name: String,
    #[serde(default)]
    pub is_const: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceDecl {
    This,
    Base,
    /// Simple name bound to an instance member of the containing type
    Member(String),
    Variable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFunctionDecl {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub locals: Vec<LocalDecl>,
    #[serde(default)]
    pub references: Vec<ReferenceDecl>,
    #[serde(default)]
    pub nested: Vec<LocalFunctionDecl>,
}

impl LocalFunctionDecl {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            modifiers: Vec::new(),
            parameters: Vec::new(),
            locals: Vec::new(),
            references: Vec::new(),
            nested: Vec::new(),
        }
    }

    pub fn modifiers(mut self, modifiers: &str) -> Self {
        self.modifiers = keywords(modifiers);
        self
    }

    pub fn param(mut self, name: &str) -> Self {
        self.parameters.push(name.to_string());
        self
    }

    pub fn local(mut self, name: &str) -> Self {
        self.locals.push(LocalDecl {
            name: name.to_string(),
            is_const: false,
        });
        self
    }

    pub fn reference(mut self, reference: ReferenceDecl) -> Self {
        self.references.push(reference);
        self
    }

    pub fn uses_this(self) -> Self {
        self.reference(ReferenceDecl::This)
    }

    pub fn uses_base(self) -> Self {
        self.reference(ReferenceDecl::Base)
    }

    pub fn uses_member(self, name: &str) -> Self {
        self.reference(ReferenceDecl::Member(name.to_string()))
    }

    pub fn uses(self, variable: &str) -> Self {
        self.reference(ReferenceDecl::Variable(variable.to_string()))
    }

    pub fn nested(mut self, function: LocalFunctionDecl) -> Self {
        self.nested.push(function);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDecl {
    /// Ignored for constructors, destructors, operators and indexers
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(flatten)]
    pub kind: MemberDeclKind,
    #[serde(default)]
    pub locals: Vec<LocalDecl>,
    #[serde(default)]
    pub local_functions: Vec<LocalFunctionDecl>,
}

impl MemberDecl {
    fn new(name: &str, kind: MemberDeclKind) -> Self {
        Self {
            name: name.to_string(),
            modifiers: Vec::new(),
            kind,
            locals: Vec::new(),
            local_functions: Vec::new(),
        }
    }

    pub fn field(name: &str, ty: &str) -> Self {
        Self::new(name, MemberDeclKind::Field { ty: ty.to_string() })
    }

    /// A property with no accessors yet; add them with `get`/`set`/`init`
    pub fn property(name: &str, ty: &str) -> Self {
        Self::new(
            name,
            MemberDeclKind::Property {
                ty: ty.to_string(),
                is_ref: false,
                parameters: Vec::new(),
                accessors: Vec::new(),
            },
        )
    }

    pub fn indexer(ty: &str) -> Self {
        Self::property("this[]", ty)
    }

    pub fn method(name: &str, return_type: &str) -> Self {
        Self::new(
            name,
            MemberDeclKind::Method {
                return_type: return_type.to_string(),
                is_ref_return: false,
                parameters: Vec::new(),
                type_params: Vec::new(),
                has_body: true,
            },
        )
    }

    pub fn constructor() -> Self {
        Self::new(
            ".ctor",
            MemberDeclKind::Constructor {
                parameters: Vec::new(),
                has_body: true,
                sets_required_members: false,
                initializer: None,
                synthesized_copy: false,
            },
        )
    }

    pub fn static_constructor() -> Self {
        Self {
            name: ".cctor".to_string(),
            ..Self::constructor().modifiers("static")
        }
    }

    pub(crate) fn synthesized_copy_constructor(record: &str) -> Self {
        Self {
            modifiers: keywords("protected"),
            kind: MemberDeclKind::Constructor {
                parameters: vec![ParamDecl {
                    name: "original".to_string(),
                    ty: record.to_string(),
                    ref_kind: RefKind::None,
                }],
                has_body: true,
                sets_required_members: false,
                initializer: None,
                synthesized_copy: true,
            },
            ..Self::constructor()
        }
    }

    pub fn destructor() -> Self {
        Self::new("Finalize", MemberDeclKind::Destructor { has_body: true })
    }

    pub fn event(name: &str, ty: &str) -> Self {
        Self::new(
            name,
            MemberDeclKind::Event {
                ty: ty.to_string(),
                has_accessors: false,
            },
        )
    }

    pub fn operator(token: OperatorToken, return_type: &str) -> Self {
        Self::new(
            &format!("op_{token:?}"),
            MemberDeclKind::Operator {
                token,
                return_type: return_type.to_string(),
                parameters: Vec::new(),
                has_body: true,
            },
        )
    }

    pub fn conversion(is_explicit: bool, return_type: &str) -> Self {
        let name = if is_explicit { "op_Explicit" } else { "op_Implicit" };
        Self::new(
            name,
            MemberDeclKind::Conversion {
                is_explicit,
                return_type: return_type.to_string(),
                parameters: Vec::new(),
                has_body: true,
            },
        )
    }

    pub fn modifiers(mut self, modifiers: &str) -> Self {
        self.modifiers = keywords(modifiers);
        self
    }

    fn parameters_mut(&mut self) -> Option<&mut Vec<ParamDecl>> {
        match &mut self.kind {
            MemberDeclKind::Property { parameters, .. }
            | MemberDeclKind::Method { parameters, .. }
            | MemberDeclKind::Constructor { parameters, .. }
            | MemberDeclKind::Operator { parameters, .. }
            | MemberDeclKind::Conversion { parameters, .. } => Some(parameters),
            MemberDeclKind::Field { .. }
            | MemberDeclKind::Destructor { .. }
            | MemberDeclKind::Event { .. } => None,
        }
    }

    pub fn param(self, name: &str, ty: &str) -> Self {
        self.param_with(name, ty, RefKind::None)
    }

    pub fn param_with(mut self, name: &str, ty: &str, ref_kind: RefKind) -> Self {
        if let Some(parameters) = self.parameters_mut() {
            parameters.push(ParamDecl {
                name: name.to_string(),
                ty: ty.to_string(),
                ref_kind,
            });
        }
        self
    }

    /// Declare the member without a body (`;` instead of `{ }`)
    pub fn no_body(mut self) -> Self {
        match &mut self.kind {
            MemberDeclKind::Method { has_body, .. }
            | MemberDeclKind::Constructor { has_body, .. }
            | MemberDeclKind::Destructor { has_body }
            | MemberDeclKind::Operator { has_body, .. }
            | MemberDeclKind::Conversion { has_body, .. } => *has_body = false,
            MemberDeclKind::Field { .. }
            | MemberDeclKind::Property { .. }
            | MemberDeclKind::Event { .. } => {}
        }
        self
    }

    pub fn accessor(mut self, accessor: AccessorDecl) -> Self {
        if let MemberDeclKind::Property { accessors, .. } = &mut self.kind {
            accessors.push(accessor);
        }
        self
    }

    pub fn get(self) -> Self {
        self.accessor(AccessorDecl::new(AccessorKind::Get))
    }

    pub fn set(self) -> Self {
        self.accessor(AccessorDecl::new(AccessorKind::Set))
    }

    pub fn init(self) -> Self {
        self.accessor(AccessorDecl::new(AccessorKind::Init))
    }

    /// `ref` return for methods and properties
    pub fn by_ref(mut self) -> Self {
        match &mut self.kind {
            MemberDeclKind::Property { is_ref, .. } => *is_ref = true,
            MemberDeclKind::Method { is_ref_return, .. } => *is_ref_return = true,
            _ => {}
        }
        self
    }

    pub fn type_param(mut self, param: TypeParamDecl) -> Self {
        if let MemberDeclKind::Method { type_params, .. } = &mut self.kind {
            type_params.push(param);
        }
        self
    }

    pub fn sets_required_members(mut self) -> Self {
        if let MemberDeclKind::Constructor {
            sets_required_members,
            ..
        } = &mut self.kind
        {
            *sets_required_members = true;
        }
        self
    }

    fn chains_to(mut self, kind: ConstructorInitializerKind, argument_count: usize) -> Self {
        if let MemberDeclKind::Constructor { initializer, .. } = &mut self.kind {
            *initializer = Some(InitializerDecl {
                kind,
                argument_count,
            });
        }
        self
    }

    pub fn chains_to_base(self, argument_count: usize) -> Self {
        self.chains_to(ConstructorInitializerKind::Base, argument_count)
    }

    pub fn chains_to_this(self, argument_count: usize) -> Self {
        self.chains_to(ConstructorInitializerKind::This, argument_count)
    }

    pub fn with_accessors(mut self) -> Self {
        if let MemberDeclKind::Event { has_accessors, .. } = &mut self.kind {
            *has_accessors = true;
        }
        self
    }

    pub fn local(mut self, name: &str) -> Self {
        self.locals.push(LocalDecl {
            name: name.to_string(),
            is_const: false,
        });
        self
    }

    pub fn const_local(mut self, name: &str) -> Self {
        self.locals.push(LocalDecl {
            name: name.to_string(),
            is_const: true,
        });
        self
    }

    pub fn local_function(mut self, function: LocalFunctionDecl) -> Self {
        self.local_functions.push(function);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializerEntryDecl {
    pub member: String,
    #[serde(default)]
    pub kind: InitializerEntryKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationDecl {
    pub ty: String,
    #[serde(default)]
    pub argument_count: usize,
    /// Bind to the record copy constructor (`with` expressions)
    #[serde(default)]
    pub copy: bool,
    #[serde(default)]
    pub target_typed: bool,
    #[serde(default)]
    pub initializers: Vec<InitializerEntryDecl>,
}

impl CreationDecl {
    pub fn new(ty: &str) -> Self {
        Self {
            ty: ty.to_string(),
            argument_count: 0,
            copy: false,
            target_typed: false,
            initializers: Vec::new(),
        }
    }

    pub fn args(mut self, argument_count: usize) -> Self {
        self.argument_count = argument_count;
        self
    }

    pub fn copy(mut self) -> Self {
        self.copy = true;
        self.argument_count = 1;
        self
    }

    pub fn target_typed(mut self) -> Self {
        self.target_typed = true;
        self
    }

    fn entry(mut self, member: &str, kind: InitializerEntryKind) -> Self {
        self.initializers.push(InitializerEntryDecl {
            member: member.to_string(),
            kind,
        });
        self
    }

    pub fn assign(self, member: &str) -> Self {
        self.entry(member, InitializerEntryKind::Assignment)
    }

    pub fn nested_initializer(self, member: &str) -> Self {
        self.entry(member, InitializerEntryKind::NestedInitializer)
    }

    pub fn assign_new(self, member: &str) -> Self {
        self.entry(member, InitializerEntryKind::NewWithInitializer)
    }
}

/// `generic` is a type name (`G`) or a method (`C.M`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstantiationDecl {
    pub generic: String,
    pub type_param: String,
    pub argument: String,
}

impl InstantiationDecl {
    pub fn new(generic: &str, type_param: &str, argument: &str) -> Self {
        Self {
            generic: generic.to_string(),
            type_param: type_param.to_string(),
            argument: argument.to_string(),
        }
    }
}
