//! Per-strategy range computation.
//!
//! Every strategy reduces to a few reusable shapes: locate a single token,
//! span between two sub-elements, descend past qualifiers, collect a token
//! kind across children, or point at the last meaningful child. Each shape
//! is implemented once and parameterized; every chain ends in [`default`].

use louhi_syntax::SyntaxKind::{self, *};
use louhi_syntax::{NodeView, SyntaxSet};
use text_size::{TextRange, TextSize};

use crate::PositioningStrategy;
use crate::navigate::*;
use crate::ranges::{mark_element, mark_range, range_between};
use crate::unreachable::{UnreachablePayload, mark_unreachable};

const NON_FINAL_MODIFIERS: SyntaxSet = SyntaxSet::new([ABSTRACT_KW, OPEN_KW, SEALED_KW]);
const VARIANCE_MODIFIERS: SyntaxSet = SyntaxSet::new([IN_KW, OUT_KW]);
const INLINE_PARAMETER_MODIFIERS: SyntaxSet = SyntaxSet::new([NOINLINE_KW, CROSSINLINE_KW]);
const EXPECT_ACTUAL_MODIFIERS: SyntaxSet = SyntaxSet::new([EXPECT_KW, ACTUAL_KW]);
const INLINE_OR_VALUE_MODIFIERS: SyntaxSet = SyntaxSet::new([INLINE_KW, VALUE_KW]);
const SUSPEND_OR_FUN_MODIFIERS: SyntaxSet = SyntaxSet::new([SUSPEND_KW, FUN_KW]);

/// Node kinds whose operation token is the natural thing to point at.
const NODES_WITH_OPERATION: SyntaxSet = SyntaxSet::new([
    BINARY_EXPR,
    BINARY_WITH_TYPE,
    PREFIX_EXPR,
    POSTFIX_EXPR,
    WHEN_CONDITION_IN_RANGE,
]);

/// Kinds a qualified import path can contain directly under the directive.
const INSIDE_DIRECTIVE_EXPRESSIONS: SyntaxSet = SyntaxSet::new([DOT_EXPR, REFERENCE_EXPR]);

pub(crate) fn mark<V: NodeView>(
    strategy: PositioningStrategy,
    node: V,
    payload: Option<&UnreachablePayload>,
) -> Vec<TextRange> {
    use PositioningStrategy as S;

    match strategy {
        S::Default => default(node),
        S::WholeElement => mark_element(node),
        S::LastChild => mark_element(last_child(node).unwrap_or(node)),

        S::SupertypesList => mark_element(supertypes_list(node).unwrap_or(node)),
        S::ValOrVarNode => mark_element(val_or_var_keyword(node).unwrap_or(node)),
        S::CompanionObject => mark_element(modifier_of_kind(node, COMPANION_KW).unwrap_or(node)),
        S::SecondaryConstructorDelegationCall => secondary_constructor_delegation_call(node),
        S::DeclarationReturnType => mark_element(return_type_element(node)),
        S::DeclarationStartToName => declaration_start_to_name(node),
        S::DeclarationName => declaration_name(node),
        S::ActualDeclarationName => match name_token(node) {
            Some(name) => mark_element(name),
            None => default(node),
        },
        S::DeclarationSignature => declaration_signature(node),
        S::DeclarationSignatureOrDefault => {
            if node.kind().is_declaration() {
                declaration_signature(node)
            } else {
                default(node)
            }
        }
        S::DeclarationWithBody => declaration_with_body(node),
        S::TypeParametersOrDeclarationSignature => match type_param_list(node) {
            Some(params) => mark_element(params),
            None => declaration_signature(node),
        },
        S::TypeParametersList => mark_element(type_param_list(node).unwrap_or(node)),
        S::ObjectKeyword => keyword_or_default(node, object_keyword(node)),
        S::FieldKeyword => keyword_or_default(node, child_of_kind(node, FIELD_KW)),
        S::PropertyDelegate => {
            keyword_or_default(node, child_of_kind(node, PROPERTY_DELEGATE))
        }
        S::PropertyInitializer => property_initializer(node),
        S::FunctionParameters => function_parameters(node),
        S::Receiver => match receiver_type_reference(node) {
            Some(receiver) => mark_element(receiver),
            None => default(node),
        },
        S::ForRedeclaration => for_redeclaration(node),
        S::ForUnresolvedReference => for_unresolved_reference(node),
        S::NotSupportedInInlineMostRelevant => not_supported_in_inline(node),
        S::FunInterface => fun_interface(node),

        S::VisibilityModifier => modifier_set(node, &SyntaxKind::VISIBILITY_MODIFIERS),
        S::ModalityModifier => modifier_set(node, &SyntaxKind::MODALITY_MODIFIERS),
        S::AbstractModifier => modifier_set(node, &SyntaxSet::new([ABSTRACT_KW])),
        S::OpenModifier => modifier_set(node, &SyntaxSet::new([OPEN_KW])),
        S::OverrideModifier => modifier_set(node, &SyntaxSet::new([OVERRIDE_KW])),
        S::PrivateModifier => modifier_set(node, &SyntaxSet::new([PRIVATE_KW])),
        S::LateinitModifier => modifier_set(node, &SyntaxSet::new([LATEINIT_KW])),
        S::VarianceModifier => modifier_set(node, &VARIANCE_MODIFIERS),
        S::ConstModifier => modifier_set(node, &SyntaxSet::new([CONST_KW])),
        S::FunModifier => modifier_set(node, &SyntaxSet::new([FUN_KW])),
        S::SuspendModifier => modifier_set(node, &SyntaxSet::new([SUSPEND_KW])),
        S::InlineOrValueModifier => modifier_set(node, &INLINE_OR_VALUE_MODIFIERS),
        S::InnerModifier => modifier_set(node, &SyntaxSet::new([INNER_KW])),
        S::DataModifier => modifier_set(node, &SyntaxSet::new([DATA_KW])),
        S::OperatorModifier => modifier_set(node, &SyntaxSet::new([OPERATOR_KW])),
        S::EnumModifier => modifier_set(node, &SyntaxSet::new([ENUM_KW])),
        S::TailrecModifier => modifier_set(node, &SyntaxSet::new([TAILREC_KW])),
        S::ExternalModifier => modifier_set(node, &SyntaxSet::new([EXTERNAL_KW])),
        S::ExpectActualModifier => modifier_set(node, &EXPECT_ACTUAL_MODIFIERS),
        S::ReifiedModifier => modifier_set(node, &SyntaxSet::new([REIFIED_KW])),
        S::InlineParameterModifier => modifier_set(node, &INLINE_PARAMETER_MODIFIERS),
        S::InlineFunModifier => inline_fun_modifier(node),
        S::NonFinalModifierOrName => modifier_set(node, &NON_FINAL_MODIFIERS),
        S::ParameterVarargModifier => {
            mark_element(modifier_of_kind(node, VARARG_KW).unwrap_or(node))
        }

        S::Operator => mark_element(operation_reference(node).unwrap_or(node)),
        S::AsType | S::UselessElvis => operation_to_end(node),
        S::ReturnWithLabel => return_with_label(node),
        S::WhenExpression => keyword_or_default(node, child_of_kind(node, WHEN_KW)),
        S::IfExpression => keyword_or_default(node, child_of_kind(node, IF_KW)),
        S::ElseEntry => keyword_or_default(node, child_of_kind(node, ELSE_KW)),
        S::WhenConditionInRange => mark_element(operation_reference(node).unwrap_or(node)),
        S::SpecialConstructToken => special_construct_token(node),
        S::ArrayAccess => keyword_or_default(node, child_of_kind(node, INDICES)),
        S::SafeAccess => mark_element(child_of_kind(node, SAFE_ACCESS).unwrap_or(node)),
        S::DotByQualified => dot_by_qualified(node),
        S::SelectorByQualified => selector_by_qualified(node),
        S::ReferenceByQualified => find_reference(node, false),
        S::ReferencedNameByQualified => find_reference(node, true),
        S::CallElement => {
            mark_element(reference_expression(node, false).unwrap_or(node))
        }
        S::CallElementWithDot => call_element_with_dot(node),
        S::CallExpression => call_expression(node),
        S::ValueArguments => value_arguments(node),
        S::NameOfNamedArgument => {
            mark_element(child_of_kind(node, VALUE_ARG_NAME).unwrap_or(node))
        }
        S::SpreadOperator => spread_operator(node),
        S::Label => mark_element(child_of_kind(node, LABEL_QUALIFIER).unwrap_or(node)),
        S::NameIdentifier => name_identifier(node),
        S::Commas => commas(node),
        S::LongLiteralSuffix => long_literal_suffix(node),
        S::CutCharQuotes => cut_char_quotes(node),
        S::UnusedValue => unused_value(node),
        S::UnreachableCode => match payload {
            Some(payload) => mark_unreachable(node, payload).unwrap_or_else(|| default(node)),
            None => default(node),
        },

        S::ImportLastName => import_last_name(node),
        S::ImportAlias => import_alias(node),
        S::DelegatedSupertypeByKeyword => delegated_supertype_by_keyword(node),
        S::RedundantNullable => redundant_nullable(node),
        S::NullableType => keyword_or_default(node, child_of_kind(node, QUEST)),
        S::QuestionMarkByType => question_mark_by_type(node),
        S::AnnotationUseSite => {
            keyword_or_default(node, child_of_kind(node, ANNOTATION_TARGET))
        }
        S::ParameterDefaultValue => mark_element(default_value(node).unwrap_or(node)),
    }
}

pub(crate) fn is_valid<V: NodeView>(strategy: PositioningStrategy, node: V) -> bool {
    use PositioningStrategy as S;

    match strategy {
        S::DeclarationName | S::DeclarationStartToName => {
            declaration_header_is_valid(node)
        }
        S::PropertyDelegate => child_of_kind(node, PROPERTY_DELEGATE).is_some(),
        S::DeclarationWithBody => {
            let block =
                if node.kind() == BLOCK { Some(node) } else { child_of_kind(node, BLOCK) };
            block.is_some_and(|block| last_child_of_kind(block, RIGHT_BRACE).is_some())
        }
        S::ObjectKeyword => object_keyword(node).is_some(),
        S::FieldKeyword => child_of_kind(node, FIELD_KW).is_some(),
        S::Commas => node.children().any(|child| child.kind() == COMMA),
        S::ImportLastName => !has_error_descendant(node),
        _ => true,
    }
}

/// Declarations other than objects, constructors, and functions must have a
/// name for header strategies to point at.
fn declaration_header_is_valid<V: NodeView>(node: V) -> bool {
    if matches!(node.kind(), OBJECT_DECL | OBJECT_LITERAL | FUN | LAMBDA_EXPR | SECONDARY_CONSTRUCTOR)
    {
        return true;
    }
    if node.kind().is_declaration() && name_token(node).is_none() {
        return false;
    }
    true
}

fn default<V: NodeView>(node: V) -> Vec<TextRange> {
    match node.kind() {
        OBJECT_LITERAL => {
            let Some(declaration) = find_descendant(node, OBJECT_DECL, true) else {
                return mark_element(node);
            };
            let Some(object_kw) = object_keyword(declaration) else {
                return mark_element(node);
            };
            match supertypes_list(declaration) {
                Some(supertypes) => mark_range(object_kw, supertypes),
                None => mark_element(object_kw),
            }
        }
        OBJECT_DECL => {
            let Some(object_kw) = object_keyword(node) else {
                return mark_element(node);
            };
            mark_range(object_kw, name_token(node).unwrap_or(object_kw))
        }
        CONSTRUCTOR_DELEGATION_CALL => secondary_constructor_delegation_call(node),
        _ => mark_element(node),
    }
}

fn keyword_or_default<V: NodeView>(node: V, keyword: Option<V>) -> Vec<TextRange> {
    match keyword {
        Some(keyword) => mark_element(keyword),
        None => default(node),
    }
}

fn secondary_constructor_delegation_call<V: NodeView>(node: V) -> Vec<TextRange> {
    match node.kind() {
        SECONDARY_CONSTRUCTOR => constructor_keyword_to_parameters(node),
        CONSTRUCTOR_DELEGATION_CALL => {
            let delegation_reference = child_of_kind(node, CONSTRUCTOR_DELEGATION_REFERENCE);
            if let Some(reference) = delegation_reference {
                if reference.is_leaf() {
                    // Implicit delegation: point at the constructor header.
                    if let Some(constructor) = find_parent_of_kind(node, SECONDARY_CONSTRUCTOR) {
                        return constructor_keyword_to_parameters(constructor);
                    }
                }
                return mark_element(reference);
            }
            mark_element(node)
        }
        _ => default(node),
    }
}

fn constructor_keyword_to_parameters<V: NodeView>(constructor: V) -> Vec<TextRange> {
    let Some(parameters) = value_param_list(constructor) else {
        return mark_element(constructor);
    };
    let Some(keyword) = constructor_keyword(constructor) else {
        return mark_element(constructor);
    };
    mark_range(keyword, last_child(parameters).unwrap_or(parameters))
}

fn return_type_element<V: NodeView>(node: V) -> V {
    let (return_type, name_or_placeholder) = if node.kind() == PROPERTY_ACCESSOR {
        (type_reference(node), accessor_name_placeholder(node))
    } else if node.kind().is_declaration() {
        (type_reference(node), name_token(node))
    } else {
        (None, None)
    };
    return_type.or(name_or_placeholder).unwrap_or(node)
}

fn declaration_start_to_name<V: NodeView>(node: V) -> Vec<TextRange> {
    let start = first_meaningful_leaf(node).unwrap_or(node);
    if let Some(name) = name_token(node) {
        return mark_range(start, name);
    }

    let end = match node.kind() {
        PRIMARY_CONSTRUCTOR | SECONDARY_CONSTRUCTOR => constructor_keyword(node),
        OBJECT_DECL => object_keyword(node),
        _ => return default(node),
    };
    mark_range(start, end.unwrap_or(node))
}

fn declaration_name<V: NodeView>(node: V) -> Vec<TextRange> {
    if let Some(name) = name_token(node) {
        // `enum class E` reads as one unit, so the mark stretches from the
        // enum modifier over the name.
        if matches!(node.kind(), CLASS | OBJECT_DECL) {
            if let Some(enum_modifier) = modifier_of_kind(node, ENUM_KW) {
                return mark_range(enum_modifier, name);
            }
        }
        return mark_element(name);
    }
    if node.kind() == FUN {
        return declaration_signature(node);
    }
    default(node)
}

fn declaration_signature<V: NodeView>(node: V) -> Vec<TextRange> {
    match node.kind() {
        PRIMARY_CONSTRUCTOR | SECONDARY_CONSTRUCTOR => {
            let keyword = constructor_keyword(node);
            let parameters = value_param_list(node);
            let Some(begin) = keyword.or(parameters) else {
                return mark_element(node);
            };
            let Some(end) = parameters.or(keyword) else {
                return mark_element(node);
            };
            mark_range(begin, end)
        }
        FUN | LAMBDA_EXPR => {
            let end = type_reference(node)
                .or_else(|| value_param_list(node))
                .or_else(|| name_token(node))
                .unwrap_or(node);
            let start = if node.kind() == LAMBDA_EXPR {
                value_param_list(node).unwrap_or(node)
            } else {
                node
            };
            mark_range(start, end)
        }
        PROPERTY => {
            let end = type_reference(node).or_else(|| name_token(node)).unwrap_or(node);
            mark_range(node, end)
        }
        PROPERTY_ACCESSOR => {
            let end = type_reference(node)
                .or_else(|| value_param_list(node).and_then(|parameters| {
                    last_child_of_kind(parameters, RIGHT_PAREN)
                }))
                .or_else(|| accessor_name_placeholder(node))
                .unwrap_or(node);
            mark_range(node, end)
        }
        CLASS => {
            let Some(name) = name_token(node) else {
                return mark_element(node);
            };
            let Some(parameters) = primary_constructor(node).and_then(value_param_list) else {
                return mark_element(name);
            };
            mark_range(name, parameters)
        }
        OBJECT_DECL => declaration_name(node),
        CLASS_INITIALIZER => mark_element(child_of_kind(node, INIT_KW).unwrap_or(node)),
        _ => default(node),
    }
}

fn declaration_with_body<V: NodeView>(node: V) -> Vec<TextRange> {
    let block = if node.kind() == BLOCK { Some(node) } else { child_of_kind(node, BLOCK) };
    let bracket = block.and_then(|block| last_child_of_kind(block, RIGHT_BRACE));
    match (bracket, block) {
        (Some(bracket), _) => mark_element(bracket),
        (None, Some(block)) => vec![last_symbol(block.range())],
        (None, None) => default(node),
    }
}

fn last_symbol(range: TextRange) -> TextRange {
    if range.is_empty() {
        range
    } else {
        TextRange::new(range.end() - TextSize::new(1), range.end())
    }
}

fn property_initializer<V: NodeView>(node: V) -> Vec<TextRange> {
    match node.kind() {
        PROPERTY => mark_element(default_value(node).unwrap_or(node)),
        VALUE_PARAM => mark_element(type_reference(node).unwrap_or(node)),
        _ => mark_element(node),
    }
}

fn function_parameters<V: NodeView>(node: V) -> Vec<TextRange> {
    if let Some(parameters) = value_param_list(node) {
        return mark_element(parameters);
    }
    if node.kind() == LAMBDA_EXPR {
        if let Some(brace) = child_of_kind(node, LEFT_BRACE) {
            return mark_element(brace);
        }
    }
    if node.kind().is_declaration() {
        declaration_signature(node)
    } else {
        default(node)
    }
}

fn for_redeclaration<V: NodeView>(node: V) -> Vec<TextRange> {
    let name = match node.kind() {
        MODULE => child_of_kind(node, PACKAGE_DIRECTIVE)
            .and_then(|directive| find_last_descendant(directive, |it| it.kind() == REFERENCE_EXPR)),
        _ => name_token(node),
    };

    match name {
        Some(name) => mark_element(name),
        None if node.kind() == OBJECT_DECL => default(node),
        None => mark_element(node),
    }
}

fn for_unresolved_reference<V: NodeView>(node: V) -> Vec<TextRange> {
    if node.kind() == ARRAY_ACCESS_EXPR {
        if let Some(indices) = child_of_kind(node, INDICES) {
            return mark_element(indices);
        }
    }
    mark_element(node)
}

fn not_supported_in_inline<V: NodeView>(node: V) -> Vec<TextRange> {
    let target = match node.kind() {
        CLASS => child_of_kind(node, CLASS_KW),
        OBJECT_DECL => object_keyword(node),
        FUN => modifier_of_kind(node, INLINE_KW).or_else(|| child_of_kind(node, FUN_KW)),
        _ => None,
    };
    mark_element(target.unwrap_or(node))
}

fn fun_interface<V: NodeView>(node: V) -> Vec<TextRange> {
    match node.kind() {
        CLASS => modifier_set(node, &SyntaxSet::new([FUN_KW])),
        PROPERTY => mark_element(val_or_var_keyword(node).unwrap_or(node)),
        FUN => {
            if let Some(type_params) = type_param_list(node) {
                mark_element(type_params)
            } else {
                modifier_set(node, &SUSPEND_OR_FUN_MODIFIERS)
            }
        }
        _ => default(node),
    }
}

/// Single-token locator over a modifier list, with the original's fallback
/// chain: modifier, then name, then a kind-specific anchor.
fn modifier_set<V: NodeView>(node: V, modifiers: &SyntaxSet) -> Vec<TextRange> {
    if let Some(modifier) = modifier_in(node, modifiers) {
        return mark_element(modifier);
    }
    if let Some(name) = name_token(node) {
        return mark_element(name);
    }
    match node.kind() {
        OBJECT_DECL => keyword_or_default(node, object_keyword(node)),
        PROPERTY_ACCESSOR => keyword_or_default(node, accessor_name_placeholder(node)),
        _ => mark_element(node),
    }
}

fn inline_fun_modifier<V: NodeView>(node: V) -> Vec<TextRange> {
    if node.kind() == PROPERTY {
        let accessor_modifier = getter(node)
            .and_then(|accessor| modifier_of_kind(accessor, INLINE_KW))
            .or_else(|| setter(node).and_then(|accessor| modifier_of_kind(accessor, INLINE_KW)));
        if let Some(modifier) = accessor_modifier {
            return mark_element(modifier);
        }
    }
    modifier_set(node, &SyntaxSet::new([INLINE_KW]))
}

fn operation_to_end<V: NodeView>(node: V) -> Vec<TextRange> {
    mark_range(
        operation_reference(node).unwrap_or(node),
        last_child(node).unwrap_or(node),
    )
}

fn return_with_label<V: NodeView>(node: V) -> Vec<TextRange> {
    if let Some(label) = child_of_kind(node, LABEL_QUALIFIER) {
        return mark_range(node, label);
    }
    keyword_or_default(node, child_of_kind(node, RETURN_KW))
}

fn special_construct_token<V: NodeView>(node: V) -> Vec<TextRange> {
    let token = match node.kind() {
        WHEN_EXPR => child_of_kind(node, WHEN_KW),
        IF_EXPR => child_of_kind(node, IF_KW),
        _ => operation_reference(node),
    };
    mark_element(token.unwrap_or(node))
}

fn dot_by_qualified<V: NodeView>(node: V) -> Vec<TextRange> {
    if node.kind() == BINARY_EXPR
        && find_descendant_in_set(node, &SyntaxKind::ALL_ASSIGNMENTS).is_some()
    {
        if let Some(qualified) = find_descendant(node, DOT_EXPR, true) {
            return mark_element(child_of_kind(qualified, DOT).unwrap_or(qualified));
        }
    }
    if node.kind() == DOT_EXPR {
        return mark_element(child_of_kind(node, DOT).unwrap_or(node));
    }
    // Fall back to marking the callee reference.
    find_reference(node, false)
}

fn selector_by_qualified<V: NodeView>(node: V) -> Vec<TextRange> {
    if node.kind() == BINARY_EXPR
        && find_descendant_in_set(node, &SyntaxKind::ALL_ASSIGNMENTS).is_some()
    {
        if let Some(expression) = find_expression_deep(node) {
            return mark_element(expression);
        }
    }
    if SyntaxKind::QUALIFIED_ACCESS.contains(node.kind()) {
        if let Some(selector) = selector(node) {
            return mark_element(selector);
        }
        return default(node);
    }
    if node.kind() == IMPORT_DIRECTIVE {
        let mut references = Vec::new();
        collect_descendants_of_kind(node, REFERENCE_EXPR, &mut references);
        if let Some(last) = references.last() {
            return mark_element(*last);
        }
    }
    if node.kind() == TYPE_REFERENCE {
        if let Some(element) = child_in_set(node, &SyntaxKind::TYPE_ELEMENTS) {
            if let Some(referenced) = referenced_type_expression(element) {
                return mark_element(referenced);
            }
        }
    }
    default(node)
}

fn find_reference<V: NodeView>(node: V, locate_referenced_name: bool) -> Vec<TextRange> {
    if node.kind() == BINARY_EXPR {
        if let Some(augmented) =
            find_descendant_in_set(node, &SyntaxKind::AUGMENTED_ASSIGNMENTS)
        {
            return mark_element(augmented);
        }
        if find_descendant(node, EQ, false).is_some() {
            // Look for the reference in the LHS of a plain assignment.
            if let Some(expression) = find_expression_deep(node) {
                return mark_element(expression);
            }
        }
    }

    match node.kind() {
        CALL_EXPR | CONSTRUCTOR_DELEGATION_CALL => {
            return mark_element(
                reference_expression(node, locate_referenced_name).unwrap_or(node),
            );
        }
        PROPERTY_DELEGATE => {
            return mark_element(find_expression_deep(node).unwrap_or(node));
        }
        ANNOTATION_ENTRY => {
            return mark_element(
                find_descendant(node, CONSTRUCTOR_CALLEE, true).unwrap_or(node),
            );
        }
        TYPE_REFERENCE => {
            let target = child_of_kind(node, NULLABLE_TYPE)
                .and_then(|nullable| child_of_kind(nullable, USER_TYPE))
                .unwrap_or(node);
            return mark_element(target);
        }
        IMPORT_DIRECTIVE => {
            return mark_element(
                child_in_set(node, &INSIDE_DIRECTIVE_EXPRESSIONS).unwrap_or(node),
            );
        }
        kind if NODES_WITH_OPERATION.contains(kind) => {
            return mark_element(operation_reference(node).unwrap_or(node));
        }
        DOT_EXPR | SAFE_ACCESS_EXPR | CALLABLE_REF_EXPR => {}
        _ => return default(node),
    }

    if let Some(selected) = selector(node) {
        match selected.kind() {
            REFERENCE_EXPR => return mark_element(selected),
            CALL_EXPR | CONSTRUCTOR_DELEGATION_CALL | SUPER_TYPE_CALL_ENTRY => {
                return mark_element(
                    reference_expression(selected, locate_referenced_name).unwrap_or(selected),
                );
            }
            _ => {}
        }
    }
    default(node)
}

fn call_element_with_dot<V: NodeView>(node: V) -> Vec<TextRange> {
    let call_element_ranges = selector_by_qualified(node);
    let [call_element_range] = call_element_ranges.as_slice() else {
        return call_element_ranges;
    };

    let dot_ranges = mark(PositioningStrategy::SafeAccess, node, None);
    let [dot_range] = dot_ranges.as_slice() else {
        return dot_ranges;
    };

    vec![range_between(*dot_range, *call_element_range)]
}

fn call_expression<V: NodeView>(node: V) -> Vec<TextRange> {
    if node.kind() == CALL_EXPR {
        let end = reference_expression(node, false).unwrap_or(node);
        return mark_range(node, end);
    }
    mark_element(node)
}

fn value_arguments<V: NodeView>(node: V) -> Vec<TextRange> {
    if node.kind() == BINARY_EXPR
        && find_descendant_in_set(node, &SyntaxKind::ALL_ASSIGNMENTS).is_some()
    {
        if let Some(lhs) = first_child_expression(node) {
            return mark_element(unwrap_parens_labels_and_annotations(lhs));
        }
    }

    let node_to_start = match node.kind() {
        kind if SyntaxKind::QUALIFIED_ACCESS.contains(kind) => {
            last_child_of_kind(node, CALL_EXPR).unwrap_or(node)
        }
        CLASS => last_child_of_kind(node, SUPER_TYPE_LIST).unwrap_or(node),
        _ => node,
    };

    let argument_list = if node_to_start.kind() == VALUE_ARG_LIST {
        Some(node_to_start)
    } else {
        child_of_kind(node_to_start, VALUE_ARG_LIST)
    };

    match argument_list {
        Some(arguments) => {
            let Some(right_parenthesis) = last_child_of_kind(arguments, RIGHT_PAREN) else {
                return mark_element(node_to_start);
            };
            match last_child_of_kind(arguments, VALUE_ARG) {
                Some(last_argument) => mark_range(last_argument, right_parenthesis),
                None => mark_range(node_to_start, right_parenthesis),
            }
        }
        None if node_to_start.kind() == CALL_EXPR => {
            mark_element(child_of_kind(node_to_start, REFERENCE_EXPR).unwrap_or(node_to_start))
        }
        None => mark_element(node_to_start),
    }
}

fn spread_operator<V: NodeView>(node: V) -> Vec<TextRange> {
    let range = node.range();
    if range.is_empty() {
        return vec![range];
    }
    vec![TextRange::at(range.start(), TextSize::new(1))]
}

fn name_identifier<V: NodeView>(node: V) -> Vec<TextRange> {
    if let Some(name) = name_token(node) {
        return mark_element(name);
    }
    if node.kind() == LABEL_QUALIFIER {
        // Drop the `@` that closes a label qualifier.
        let range = node.range();
        if !range.is_empty() {
            return vec![TextRange::new(range.start(), range.end() - TextSize::new(1))];
        }
    }
    if node.kind() == PACKAGE_DIRECTIVE {
        if let Some(reference) = find_last_descendant(node, |it| it.kind() == REFERENCE_EXPR) {
            return mark_element(reference);
        }
    }
    default(node)
}

/// One single-character range per comma among the direct children.
fn commas<V: NodeView>(node: V) -> Vec<TextRange> {
    let ranges: Vec<TextRange> = node
        .children()
        .filter(|child| child.kind() == COMMA)
        .map(|comma| comma.range())
        .collect();
    if ranges.is_empty() {
        return default(node);
    }
    ranges
}

fn long_literal_suffix<V: NodeView>(node: V) -> Vec<TextRange> {
    let is_integer =
        node.kind() == INT_NUMBER || child_of_kind(node, INT_NUMBER).is_some();
    let range = node.range();
    if is_integer && !range.is_empty() {
        return vec![TextRange::new(range.end() - TextSize::new(1), range.end())];
    }
    default(node)
}

fn cut_char_quotes<V: NodeView>(node: V) -> Vec<TextRange> {
    let is_char = node.kind() == CHAR_LITERAL || child_of_kind(node, CHAR_LITERAL).is_some();
    let range = node.range();
    if is_char && range.len() >= TextSize::new(2) {
        return vec![TextRange::new(
            range.start() + TextSize::new(1),
            range.end() - TextSize::new(1),
        )];
    }
    default(node)
}

fn unused_value<V: NodeView>(node: V) -> Vec<TextRange> {
    let (Some(left), Some(operation)) = (first_child_expression(node), operation_reference(node))
    else {
        return default(node);
    };
    mark_range(left, operation)
}

fn import_last_name<V: NodeView>(node: V) -> Vec<TextRange> {
    let mut references = Vec::new();
    collect_descendants_of_kind(node, REFERENCE_EXPR, &mut references);
    match references.last() {
        Some(last) => mark_element(*last),
        None => mark_element(node),
    }
}

fn import_alias<V: NodeView>(node: V) -> Vec<TextRange> {
    if let Some(alias) = child_of_kind(node, IMPORT_ALIAS) {
        if let Some(name) = name_token(alias) {
            return mark_element(name);
        }
    }
    import_last_name(node)
}

fn delegated_supertype_by_keyword<V: NodeView>(node: V) -> Vec<TextRange> {
    let Some(parent) = node.parent() else {
        return default(node);
    };
    if parent.kind() != DELEGATED_SUPER_TYPE_ENTRY {
        return default(node);
    }
    mark_element(child_of_kind(parent, BY_KW).unwrap_or(node))
}

fn redundant_nullable<V: NodeView>(node: V) -> Vec<TextRange> {
    let mut quests = Vec::new();
    let mut element = child_of_kind(node, NULLABLE_TYPE);
    while let Some(nullable) = element {
        if let Some(quest) = child_of_kind(nullable, QUEST) {
            quests.push(quest);
        }
        element = child_of_kind(nullable, NULLABLE_TYPE);
    }
    // Innermost question mark first in text order.
    quests.reverse();

    match quests.as_slice() {
        [] => default(node),
        [only] => mark_element(*only),
        [_, second, rest @ ..] => {
            let last = rest.last().copied().unwrap_or(*second);
            vec![range_between(second.range(), last.range())]
        }
    }
}

fn question_mark_by_type<V: NodeView>(node: V) -> Vec<TextRange> {
    if node.kind() == TYPE_REFERENCE {
        if let Some(nullable) = child_of_kind(node, NULLABLE_TYPE) {
            if let Some(quest) = child_of_kind(nullable, QUEST) {
                return mark_element(quest);
            }
        }
    }
    default(node)
}

#[cfg(test)]
mod tests {
    use louhi_parse::parse;
    use louhi_syntax::{NodeOrToken, SyntaxElement, SyntaxTree};

    use super::*;
    use crate::PositioningStrategy as S;

    fn find<'t>(tree: &'t SyntaxTree, kind: SyntaxKind) -> SyntaxElement<'t> {
        fn go<'t>(element: SyntaxElement<'t>, kind: SyntaxKind) -> Option<SyntaxElement<'t>> {
            if NodeView::kind(element) == kind {
                return Some(element);
            }
            element.children().find_map(|child| go(child, kind))
        }
        go(NodeOrToken::Node(tree.root()), kind)
            .unwrap_or_else(|| panic!("no {kind:?} in the tree"))
    }

    #[track_caller]
    fn marked(text: &str, kind: SyntaxKind, strategy: S) -> Vec<String> {
        let (tree, errors) = parse(text);
        assert!(errors.is_empty(), "unexpected errors in {text:?}: {errors:?}");
        let node = find(&tree, kind);
        strategy.mark(node).into_iter().map(|range| text[range].to_string()).collect()
    }

    #[track_caller]
    fn check(text: &str, kind: SyntaxKind, strategy: S, expected: &str) {
        assert_eq!(marked(text, kind, strategy), vec![expected.to_string()]);
    }

    #[test]
    fn modifier_is_found_in_the_modifier_list() {
        check("abstract class Foo", CLASS, S::AbstractModifier, "abstract");
        check("open class Foo", CLASS, S::ModalityModifier, "open");
        check("private val x = 1", PROPERTY, S::VisibilityModifier, "private");
    }

    #[test]
    fn absent_modifier_falls_back_to_the_name() {
        check("class Foo", CLASS, S::AbstractModifier, "Foo");
        check("val x = 1", PROPERTY, S::OverrideModifier, "x");
    }

    #[test]
    fn absent_modifier_and_name_fall_back_to_the_object_keyword() {
        check(
            "class A { companion object { } }",
            OBJECT_DECL,
            S::OpenModifier,
            "object",
        );
    }

    #[test]
    fn companion_object_marks_the_companion_modifier() {
        check(
            "class A { companion object { } }",
            OBJECT_DECL,
            S::CompanionObject,
            "companion",
        );
    }

    #[test]
    fn return_type_or_name() {
        check("fun f(): Int { }", FUN, S::DeclarationReturnType, "Int");
        check("fun f() { }", FUN, S::DeclarationReturnType, "f");
    }

    #[test]
    fn declaration_start_to_name_spans_modifiers() {
        check("private fun foo() { }", FUN, S::DeclarationStartToName, "private fun foo");
    }

    #[test]
    fn declaration_signature_of_a_property_ends_at_its_type() {
        check("val x: Int = 1", PROPERTY, S::DeclarationSignature, "val x: Int");
    }

    #[test]
    fn constructor_delegation_marks_the_delegation_reference() {
        let text = "class A { constructor(x: Int) : this() { } }";
        check(
            text,
            CONSTRUCTOR_DELEGATION_CALL,
            S::SecondaryConstructorDelegationCall,
            "this",
        );
        check(
            text,
            SECONDARY_CONSTRUCTOR,
            S::SecondaryConstructorDelegationCall,
            "constructor(x: Int)",
        );
    }

    #[test]
    fn declaration_with_body_marks_the_closing_brace() {
        check("fun f() { val x = 1 }", FUN, S::DeclarationWithBody, "}");
    }

    #[test]
    fn qualified_access_strategies() {
        check("fun f() { a.b }", DOT_EXPR, S::DotByQualified, ".");
        check("fun f() { a?.b }", SAFE_ACCESS_EXPR, S::SafeAccess, "?.");
        check("fun f() { a?.b() }", SAFE_ACCESS_EXPR, S::SelectorByQualified, "b()");
        check("fun f() { a?.b() }", SAFE_ACCESS_EXPR, S::CallElementWithDot, "?.b()");
        check("fun f() { a.b() }", DOT_EXPR, S::ReferenceByQualified, "b");
    }

    #[test]
    fn reference_by_qualified_marks_augmented_assignment_operators() {
        check("fun f() { x += 1 }", BINARY_EXPR, S::ReferenceByQualified, "+=");
    }

    #[test]
    fn referenced_name_unwraps_parentheses() {
        check("fun f() { (g)() }", CALL_EXPR, S::ReferencedNameByQualified, "g");
        check("fun f() { (g)() }", CALL_EXPR, S::ReferenceByQualified, "(g)");
    }

    #[test]
    fn operators_and_operations() {
        check("fun f() { a + b }", BINARY_EXPR, S::Operator, "+");
        check("fun f() { a as T }", BINARY_WITH_TYPE, S::AsType, "as T");
        check("fun f() { a ?: b }", BINARY_EXPR, S::UselessElvis, "?: b");
        check("fun f() { x = 1 }", BINARY_EXPR, S::UnusedValue, "x =");
    }

    #[test]
    fn control_flow_keywords() {
        check("fun f() { if (a) b }", IF_EXPR, S::IfExpression, "if");
        check("fun f() { when (x) { else -> 1 } }", WHEN_EXPR, S::WhenExpression, "when");
        check("fun f() { when (x) { else -> 1 } }", WHEN_ENTRY, S::ElseEntry, "else");
        check("fun f() { return@outer 1 }", RETURN_EXPR, S::ReturnWithLabel, "return@outer");
        check("fun f() { return 1 }", RETURN_EXPR, S::ReturnWithLabel, "return");
    }

    #[test]
    fn value_argument_strategies() {
        check("fun f() { g(x = 1) }", VALUE_ARG, S::NameOfNamedArgument, "x");
        check("fun f() { g(1, 2,) }", CALL_EXPR, S::ValueArguments, "2,)");
        check("fun f(x: Int = 5) { }", VALUE_PARAM, S::ParameterDefaultValue, "5");
        check("fun f(vararg x: Int) { }", VALUE_PARAM, S::ParameterVarargModifier, "vararg");
    }

    #[test]
    fn import_strategies() {
        check("import a.b", IMPORT_DIRECTIVE, S::ImportLastName, "b");
        check("import a.b as c", IMPORT_DIRECTIVE, S::ImportAlias, "c");
        check("import a.b", IMPORT_DIRECTIVE, S::SelectorByQualified, "b");
    }

    #[test]
    fn nullable_type_strategies() {
        check("val x: T?? = y", TYPE_REFERENCE, S::QuestionMarkByType, "?");
        let ranges = marked("val x: T?? = y", TYPE_REFERENCE, S::RedundantNullable);
        assert_eq!(ranges, vec!["?".to_string()]);
        check("val x: T? = y", NULLABLE_TYPE, S::NullableType, "?");
    }

    #[test]
    fn redundant_nullable_spans_every_extra_question_mark() {
        // In `T???` the two outer question marks are redundant.
        let text = "val x: T??? = y";
        assert_eq!(marked(text, TYPE_REFERENCE, S::RedundantNullable), vec!["??".to_string()]);
    }

    #[test]
    fn literal_trimming_strategies() {
        check("val x = 42L", LITERAL, S::LongLiteralSuffix, "L");
        check("val c = 'a'", LITERAL, S::CutCharQuotes, "a");
    }

    #[test]
    fn property_delegates_and_initializers() {
        check("val x by lazy { 1 }", PROPERTY, S::PropertyDelegate, "by lazy { 1 }");
        check("val x = 1 + 2", PROPERTY, S::PropertyInitializer, "1 + 2");
    }

    #[test]
    fn object_literal_marks_keyword_through_supertypes() {
        check("val o = object : Foo { }", OBJECT_LITERAL, S::Default, "object : Foo");
        check("class A { companion object { } }", OBJECT_DECL, S::Default, "object");
    }

    #[test]
    fn delegated_supertype_marks_the_by_keyword() {
        check(
            "class Foo : Bar by baz { }",
            TYPE_REFERENCE,
            S::DelegatedSupertypeByKeyword,
            "by",
        );
    }

    #[test]
    fn validity_mirrors_the_lookup_mark_performs() {
        let (tree, _) = parse("val x by other");
        let property = find(&tree, PROPERTY);
        assert!(S::PropertyDelegate.is_valid(property));

        let (tree, _) = parse("val x = 1");
        let property = find(&tree, PROPERTY);
        assert!(!S::PropertyDelegate.is_valid(property));
        assert!(!S::Commas.is_valid(property));

        let (tree, _) = parse("val x = 1, y = 2");
        let property = find(&tree, PROPERTY);
        assert!(S::Commas.is_valid(property));
    }
}
