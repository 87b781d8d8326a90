//! Positioning strategies: from a diagnostic's anchor node to the exact text
//! ranges a renderer should mark.
//!
//! A diagnostic is attached to a whole syntax node, but marking the whole
//! node is usually too wide: a diagnostic about an `abstract` modifier should
//! mark the keyword, not the class body. Each diagnostic kind is bound to one
//! [`PositioningStrategy`]; rendering calls [`PositioningStrategy::mark`]
//! with the anchor in whichever tree backend is active.
//!
//! Every strategy is total: when the structure it looks for is absent it
//! degrades to a narrower fallback and ultimately to [`Default`], which marks
//! the whole anchor. `mark` never panics and never returns an empty list.
//!
//! [`Default`]: PositioningStrategy::Default

use louhi_syntax::NodeView;
use text_size::TextRange;

mod navigate;
mod ranges;
mod strategies;
mod unreachable;

pub use unreachable::UnreachablePayload;

/// The catalog of positioning strategies.
///
/// A closed enum rather than a registry of named objects: binding a new
/// diagnostic kind to a strategy is a compile-time exhaustive `match`, and
/// dispatch is a plain jump.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PositioningStrategy {
    Default,
    WholeElement,
    LastChild,

    SupertypesList,
    ValOrVarNode,
    CompanionObject,
    SecondaryConstructorDelegationCall,
    DeclarationReturnType,
    DeclarationStartToName,
    DeclarationName,
    ActualDeclarationName,
    DeclarationSignature,
    DeclarationSignatureOrDefault,
    DeclarationWithBody,
    TypeParametersOrDeclarationSignature,
    TypeParametersList,
    ObjectKeyword,
    FieldKeyword,
    PropertyDelegate,
    PropertyInitializer,
    FunctionParameters,
    Receiver,
    ForRedeclaration,
    ForUnresolvedReference,
    NotSupportedInInlineMostRelevant,
    FunInterface,

    VisibilityModifier,
    ModalityModifier,
    AbstractModifier,
    OpenModifier,
    OverrideModifier,
    PrivateModifier,
    LateinitModifier,
    VarianceModifier,
    ConstModifier,
    FunModifier,
    SuspendModifier,
    InlineOrValueModifier,
    InnerModifier,
    DataModifier,
    OperatorModifier,
    EnumModifier,
    TailrecModifier,
    ExternalModifier,
    ExpectActualModifier,
    ReifiedModifier,
    InlineParameterModifier,
    InlineFunModifier,
    NonFinalModifierOrName,
    ParameterVarargModifier,

    Operator,
    AsType,
    UselessElvis,
    ReturnWithLabel,
    WhenExpression,
    IfExpression,
    ElseEntry,
    WhenConditionInRange,
    SpecialConstructToken,
    ArrayAccess,
    SafeAccess,
    DotByQualified,
    SelectorByQualified,
    ReferenceByQualified,
    ReferencedNameByQualified,
    CallElement,
    CallElementWithDot,
    CallExpression,
    ValueArguments,
    NameOfNamedArgument,
    SpreadOperator,
    Label,
    NameIdentifier,
    Commas,
    LongLiteralSuffix,
    CutCharQuotes,
    UnusedValue,
    UnreachableCode,

    ImportLastName,
    ImportAlias,
    DelegatedSupertypeByKeyword,
    RedundantNullable,
    NullableType,
    QuestionMarkByType,
    AnnotationUseSite,
    ParameterDefaultValue,
}

impl PositioningStrategy {
    pub const ALL: &'static [Self] = &[
        Self::Default,
        Self::WholeElement,
        Self::LastChild,
        Self::SupertypesList,
        Self::ValOrVarNode,
        Self::CompanionObject,
        Self::SecondaryConstructorDelegationCall,
        Self::DeclarationReturnType,
        Self::DeclarationStartToName,
        Self::DeclarationName,
        Self::ActualDeclarationName,
        Self::DeclarationSignature,
        Self::DeclarationSignatureOrDefault,
        Self::DeclarationWithBody,
        Self::TypeParametersOrDeclarationSignature,
        Self::TypeParametersList,
        Self::ObjectKeyword,
        Self::FieldKeyword,
        Self::PropertyDelegate,
        Self::PropertyInitializer,
        Self::FunctionParameters,
        Self::Receiver,
        Self::ForRedeclaration,
        Self::ForUnresolvedReference,
        Self::NotSupportedInInlineMostRelevant,
        Self::FunInterface,
        Self::VisibilityModifier,
        Self::ModalityModifier,
        Self::AbstractModifier,
        Self::OpenModifier,
        Self::OverrideModifier,
        Self::PrivateModifier,
        Self::LateinitModifier,
        Self::VarianceModifier,
        Self::ConstModifier,
        Self::FunModifier,
        Self::SuspendModifier,
        Self::InlineOrValueModifier,
        Self::InnerModifier,
        Self::DataModifier,
        Self::OperatorModifier,
        Self::EnumModifier,
        Self::TailrecModifier,
        Self::ExternalModifier,
        Self::ExpectActualModifier,
        Self::ReifiedModifier,
        Self::InlineParameterModifier,
        Self::InlineFunModifier,
        Self::NonFinalModifierOrName,
        Self::ParameterVarargModifier,
        Self::Operator,
        Self::AsType,
        Self::UselessElvis,
        Self::ReturnWithLabel,
        Self::WhenExpression,
        Self::IfExpression,
        Self::ElseEntry,
        Self::WhenConditionInRange,
        Self::SpecialConstructToken,
        Self::ArrayAccess,
        Self::SafeAccess,
        Self::DotByQualified,
        Self::SelectorByQualified,
        Self::ReferenceByQualified,
        Self::ReferencedNameByQualified,
        Self::CallElement,
        Self::CallElementWithDot,
        Self::CallExpression,
        Self::ValueArguments,
        Self::NameOfNamedArgument,
        Self::SpreadOperator,
        Self::Label,
        Self::NameIdentifier,
        Self::Commas,
        Self::LongLiteralSuffix,
        Self::CutCharQuotes,
        Self::UnusedValue,
        Self::UnreachableCode,
        Self::ImportLastName,
        Self::ImportAlias,
        Self::DelegatedSupertypeByKeyword,
        Self::RedundantNullable,
        Self::NullableType,
        Self::QuestionMarkByType,
        Self::AnnotationUseSite,
        Self::ParameterDefaultValue,
    ];

    /// Stable name of this strategy, for diagnostics tooling and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::WholeElement => "whole_element",
            Self::LastChild => "last_child",
            Self::SupertypesList => "supertypes_list",
            Self::ValOrVarNode => "val_or_var",
            Self::CompanionObject => "companion_object",
            Self::SecondaryConstructorDelegationCall => "secondary_constructor_delegation_call",
            Self::DeclarationReturnType => "declaration_return_type",
            Self::DeclarationStartToName => "declaration_start_to_name",
            Self::DeclarationName => "declaration_name",
            Self::ActualDeclarationName => "actual_declaration_name",
            Self::DeclarationSignature => "declaration_signature",
            Self::DeclarationSignatureOrDefault => "declaration_signature_or_default",
            Self::DeclarationWithBody => "declaration_with_body",
            Self::TypeParametersOrDeclarationSignature => {
                "type_parameters_or_declaration_signature"
            }
            Self::TypeParametersList => "type_parameters_list",
            Self::ObjectKeyword => "object_keyword",
            Self::FieldKeyword => "field_keyword",
            Self::PropertyDelegate => "property_delegate",
            Self::PropertyInitializer => "property_initializer",
            Self::FunctionParameters => "function_parameters",
            Self::Receiver => "receiver",
            Self::ForRedeclaration => "for_redeclaration",
            Self::ForUnresolvedReference => "for_unresolved_reference",
            Self::NotSupportedInInlineMostRelevant => "not_supported_in_inline_most_relevant",
            Self::FunInterface => "fun_interface",
            Self::VisibilityModifier => "visibility_modifier",
            Self::ModalityModifier => "modality_modifier",
            Self::AbstractModifier => "abstract_modifier",
            Self::OpenModifier => "open_modifier",
            Self::OverrideModifier => "override_modifier",
            Self::PrivateModifier => "private_modifier",
            Self::LateinitModifier => "lateinit_modifier",
            Self::VarianceModifier => "variance_modifier",
            Self::ConstModifier => "const_modifier",
            Self::FunModifier => "fun_modifier",
            Self::SuspendModifier => "suspend_modifier",
            Self::InlineOrValueModifier => "inline_or_value_modifier",
            Self::InnerModifier => "inner_modifier",
            Self::DataModifier => "data_modifier",
            Self::OperatorModifier => "operator_modifier",
            Self::EnumModifier => "enum_modifier",
            Self::TailrecModifier => "tailrec_modifier",
            Self::ExternalModifier => "external_modifier",
            Self::ExpectActualModifier => "expect_actual_modifier",
            Self::ReifiedModifier => "reified_modifier",
            Self::InlineParameterModifier => "inline_parameter_modifier",
            Self::InlineFunModifier => "inline_fun_modifier",
            Self::NonFinalModifierOrName => "non_final_modifier_or_name",
            Self::ParameterVarargModifier => "parameter_vararg_modifier",
            Self::Operator => "operator",
            Self::AsType => "as_type",
            Self::UselessElvis => "useless_elvis",
            Self::ReturnWithLabel => "return_with_label",
            Self::WhenExpression => "when_expression",
            Self::IfExpression => "if_expression",
            Self::ElseEntry => "else_entry",
            Self::WhenConditionInRange => "when_condition_in_range",
            Self::SpecialConstructToken => "special_construct_token",
            Self::ArrayAccess => "array_access",
            Self::SafeAccess => "safe_access",
            Self::DotByQualified => "dot_by_qualified",
            Self::SelectorByQualified => "selector_by_qualified",
            Self::ReferenceByQualified => "reference_by_qualified",
            Self::ReferencedNameByQualified => "referenced_name_by_qualified",
            Self::CallElement => "call_element",
            Self::CallElementWithDot => "call_element_with_dot",
            Self::CallExpression => "call_expression",
            Self::ValueArguments => "value_arguments",
            Self::NameOfNamedArgument => "name_of_named_argument",
            Self::SpreadOperator => "spread_operator",
            Self::Label => "label",
            Self::NameIdentifier => "name_identifier",
            Self::Commas => "commas",
            Self::LongLiteralSuffix => "long_literal_suffix",
            Self::CutCharQuotes => "cut_char_quotes",
            Self::UnusedValue => "unused_value",
            Self::UnreachableCode => "unreachable_code",
            Self::ImportLastName => "import_last_name",
            Self::ImportAlias => "import_alias",
            Self::DelegatedSupertypeByKeyword => "delegated_supertype_by_keyword",
            Self::RedundantNullable => "redundant_nullable",
            Self::NullableType => "nullable_type",
            Self::QuestionMarkByType => "question_mark_by_type",
            Self::AnnotationUseSite => "annotation_use_site",
            Self::ParameterDefaultValue => "parameter_default_value",
        }
    }

    /// Resolves a strategy by its stable name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|strategy| strategy.name() == name)
    }

    /// Computes the ranges to mark for a diagnostic anchored at `node`.
    ///
    /// The result is non-empty and lies within the anchor's file; for
    /// range-between strategies it may extend past the anchor itself but
    /// never past its enclosing declaration.
    pub fn mark<V: NodeView>(self, node: V) -> Vec<TextRange> {
        self.mark_with_payload(node, None)
    }

    /// Like [`mark`](Self::mark), for strategies that consume a structured
    /// payload. [`UnreachableCode`](Self::UnreachableCode) without a payload
    /// falls back to marking the whole anchor.
    pub fn mark_with_payload<V: NodeView>(
        self,
        node: V,
        payload: Option<&UnreachablePayload>,
    ) -> Vec<TextRange> {
        strategies::mark(self, node, payload)
    }

    /// Cheap structural applicability check: whether `mark` would find the
    /// text this strategy wants to point at. Used to suppress diagnostics
    /// whose target no longer exists instead of emitting a bogus range.
    pub fn is_valid<V: NodeView>(self, node: V) -> bool {
        strategies::is_valid(self, node)
    }
}

/// A diagnostic instance as the engine sees it: the anchor node in the active
/// backend, the bound strategy, and an optional structured payload.
#[derive(Clone)]
pub struct PositionedDiagnostic<V> {
    pub node: V,
    pub strategy: PositioningStrategy,
    pub payload: Option<UnreachablePayload>,
}

impl<V: NodeView> PositionedDiagnostic<V> {
    pub fn new(node: V, strategy: PositioningStrategy) -> Self {
        Self { node, strategy, payload: None }
    }

    pub fn with_payload(node: V, strategy: PositioningStrategy, payload: UnreachablePayload) -> Self {
        Self { node, strategy, payload: Some(payload) }
    }

    /// Ranges to mark; non-empty for any diagnostic whose [`is_valid`]
    /// check passed at creation time.
    ///
    /// [`is_valid`]: Self::is_valid
    pub fn mark(&self) -> Vec<TextRange> {
        self.strategy.mark_with_payload(self.node, self.payload.as_ref())
    }

    pub fn is_valid(&self) -> bool {
        self.strategy.is_valid(self.node)
    }
}
