pub mod binary_expression;
