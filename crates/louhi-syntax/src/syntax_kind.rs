use crate::SyntaxSet;

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    WHITESPACE,
    NEWLINE,
    LINE_COMMENT,

    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    LEFT_BRACE,
    RIGHT_BRACE,
    COMMA,
    SEMICOLON,
    COLON,
    COLONCOLON,
    DOT,
    SAFE_ACCESS,
    QUEST,
    AT,
    ARROW,
    EQ,
    PLUS_EQ,
    MINUS_EQ,
    STAR_EQ,
    SLASH_EQ,
    PERCENT_EQ,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    PERCENT,
    ELVIS,
    EQEQ,
    NOT_EQ,
    LT,
    GT,
    LT_EQ,
    GT_EQ,
    AND_AND,
    OR_OR,
    EXCL,

    INT_NUMBER,
    CHAR_LITERAL,
    STRING,
    NAME,

    PACKAGE_KW,
    IMPORT_KW,
    CLASS_KW,
    OBJECT_KW,
    FUN_KW,
    VAL_KW,
    VAR_KW,
    CONSTRUCTOR_KW,
    INIT_KW,
    GET_KW,
    SET_KW,
    IF_KW,
    ELSE_KW,
    WHEN_KW,
    RETURN_KW,
    AS_KW,
    IS_KW,
    IN_KW,
    OUT_KW,
    BY_KW,
    THIS_KW,
    SUPER_KW,

    ABSTRACT_KW,
    OPEN_KW,
    OVERRIDE_KW,
    PUBLIC_KW,
    PRIVATE_KW,
    INTERNAL_KW,
    PROTECTED_KW,
    FINAL_KW,
    SEALED_KW,
    CONST_KW,
    LATEINIT_KW,
    INLINE_KW,
    NOINLINE_KW,
    CROSSINLINE_KW,
    VARARG_KW,
    REIFIED_KW,
    SUSPEND_KW,
    OPERATOR_KW,
    DATA_KW,
    INNER_KW,
    EXTERNAL_KW,
    TAILREC_KW,
    EXPECT_KW,
    ACTUAL_KW,
    ENUM_KW,
    COMPANION_KW,
    VALUE_KW,
    FIELD_KW,

    UNKNOWN,
    EOF,

    MODULE,
    PACKAGE_DIRECTIVE,
    IMPORT_DIRECTIVE,
    IMPORT_ALIAS,
    CLASS,
    OBJECT_DECL,
    OBJECT_LITERAL,
    CLASS_BODY,
    PRIMARY_CONSTRUCTOR,
    SECONDARY_CONSTRUCTOR,
    CONSTRUCTOR_DELEGATION_CALL,
    CONSTRUCTOR_DELEGATION_REFERENCE,
    CLASS_INITIALIZER,
    FUN,
    PROPERTY,
    PROPERTY_ACCESSOR,
    PROPERTY_DELEGATE,
    MODIFIER_LIST,
    ANNOTATION_ENTRY,
    ANNOTATION_TARGET,
    CONSTRUCTOR_CALLEE,
    TYPE_PARAM_LIST,
    TYPE_PARAM,
    VALUE_PARAM_LIST,
    VALUE_PARAM,
    SUPER_TYPE_LIST,
    SUPER_TYPE_ENTRY,
    DELEGATED_SUPER_TYPE_ENTRY,
    SUPER_TYPE_CALL_ENTRY,
    TYPE_REFERENCE,
    USER_TYPE,
    NULLABLE_TYPE,
    REFERENCE_EXPR,
    DOT_EXPR,
    SAFE_ACCESS_EXPR,
    CALLABLE_REF_EXPR,
    CALL_EXPR,
    VALUE_ARG_LIST,
    VALUE_ARG,
    VALUE_ARG_NAME,
    ARRAY_ACCESS_EXPR,
    INDICES,
    BINARY_EXPR,
    BINARY_WITH_TYPE,
    PREFIX_EXPR,
    POSTFIX_EXPR,
    OPERATION_REFERENCE,
    PAREN_EXPR,
    LABELED_EXPR,
    LABEL_QUALIFIER,
    ANNOTATED_EXPR,
    LAMBDA_EXPR,
    BLOCK,
    IF_EXPR,
    WHEN_EXPR,
    WHEN_ENTRY,
    WHEN_CONDITION_IN_RANGE,
    RETURN_EXPR,
    LITERAL,

    ERROR,
    TOMBSTONE,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE | Self::LINE_COMMENT)
    }

    /// Declarations whose header strategies (name, signature, modifiers)
    /// apply.
    pub fn is_declaration(self) -> bool {
        Self::DECLARATIONS.contains(self)
    }

    /// Expression nodes, including wrapped and qualified forms.
    pub fn is_expression(self) -> bool {
        Self::EXPRESSIONS.contains(self)
    }

    pub const DECLARATIONS: SyntaxSet = SyntaxSet::new([
        Self::PRIMARY_CONSTRUCTOR,
        Self::SECONDARY_CONSTRUCTOR,
        Self::FUN,
        Self::LAMBDA_EXPR,
        Self::PROPERTY,
        Self::PROPERTY_ACCESSOR,
        Self::CLASS,
        Self::OBJECT_DECL,
        Self::CLASS_INITIALIZER,
    ]);

    pub const EXPRESSIONS: SyntaxSet = SyntaxSet::new([
        Self::REFERENCE_EXPR,
        Self::DOT_EXPR,
        Self::SAFE_ACCESS_EXPR,
        Self::CALLABLE_REF_EXPR,
        Self::CALL_EXPR,
        Self::ARRAY_ACCESS_EXPR,
        Self::BINARY_EXPR,
        Self::BINARY_WITH_TYPE,
        Self::PREFIX_EXPR,
        Self::POSTFIX_EXPR,
        Self::PAREN_EXPR,
        Self::LABELED_EXPR,
        Self::ANNOTATED_EXPR,
        Self::LAMBDA_EXPR,
        Self::BLOCK,
        Self::IF_EXPR,
        Self::WHEN_EXPR,
        Self::RETURN_EXPR,
        Self::OBJECT_LITERAL,
        Self::LITERAL,
        Self::FUN,
    ]);

    /// Keywords allowed inside a modifier list.
    pub const MODIFIER_KEYWORDS: SyntaxSet = SyntaxSet::new([
        Self::ABSTRACT_KW,
        Self::OPEN_KW,
        Self::OVERRIDE_KW,
        Self::PUBLIC_KW,
        Self::PRIVATE_KW,
        Self::INTERNAL_KW,
        Self::PROTECTED_KW,
        Self::FINAL_KW,
        Self::SEALED_KW,
        Self::CONST_KW,
        Self::LATEINIT_KW,
        Self::INLINE_KW,
        Self::NOINLINE_KW,
        Self::CROSSINLINE_KW,
        Self::VARARG_KW,
        Self::REIFIED_KW,
        Self::SUSPEND_KW,
        Self::OPERATOR_KW,
        Self::DATA_KW,
        Self::INNER_KW,
        Self::EXTERNAL_KW,
        Self::TAILREC_KW,
        Self::EXPECT_KW,
        Self::ACTUAL_KW,
        Self::ENUM_KW,
        Self::COMPANION_KW,
        Self::VALUE_KW,
        Self::IN_KW,
        Self::OUT_KW,
    ]);

    pub const VISIBILITY_MODIFIERS: SyntaxSet = SyntaxSet::new([
        Self::PUBLIC_KW,
        Self::PRIVATE_KW,
        Self::INTERNAL_KW,
        Self::PROTECTED_KW,
    ]);

    pub const MODALITY_MODIFIERS: SyntaxSet =
        SyntaxSet::new([Self::ABSTRACT_KW, Self::FINAL_KW, Self::SEALED_KW, Self::OPEN_KW]);

    pub const AUGMENTED_ASSIGNMENTS: SyntaxSet = SyntaxSet::new([
        Self::PLUS_EQ,
        Self::MINUS_EQ,
        Self::STAR_EQ,
        Self::SLASH_EQ,
        Self::PERCENT_EQ,
    ]);

    pub const ALL_ASSIGNMENTS: SyntaxSet =
        Self::AUGMENTED_ASSIGNMENTS.union(&SyntaxSet::new([Self::EQ]));

    pub const QUALIFIED_ACCESS: SyntaxSet =
        SyntaxSet::new([Self::DOT_EXPR, Self::SAFE_ACCESS_EXPR]);

    pub const VAL_VAR: SyntaxSet = SyntaxSet::new([Self::VAL_KW, Self::VAR_KW]);

    pub const CLASS_OBJECT_KEYWORDS: SyntaxSet =
        SyntaxSet::new([Self::CLASS_KW, Self::OBJECT_KW]);

    pub const TYPE_ELEMENTS: SyntaxSet = SyntaxSet::new([Self::USER_TYPE, Self::NULLABLE_TYPE]);

    /// Tokens that separate or delimit but never carry meaning of their own.
    pub const PUNCTUATION: SyntaxSet = SyntaxSet::new([
        Self::LEFT_PAREN,
        Self::RIGHT_PAREN,
        Self::LEFT_BRACKET,
        Self::RIGHT_BRACKET,
        Self::LEFT_BRACE,
        Self::RIGHT_BRACE,
        Self::COMMA,
        Self::SEMICOLON,
        Self::ARROW,
    ]);
}
