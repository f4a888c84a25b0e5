//! Plural-Forms rules
//!
//! Gettext catalogs declare how many plural forms a language has and how
//! a count maps onto them, as a C integer expression in the header:
//!
//! ```text
//! Plural-Forms: nplurals=3; plural=(n==1 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);
//! ```
//!
//! [`PluralRule`] parses that declaration and evaluates the expression
//! for a given count. Catalogs without the header get the germanic
//! two-form default.

/// Errors raised while parsing a `Plural-Forms` declaration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PluralRuleError {
	/// The declaration is not of the `nplurals=N; plural=EXPR;` shape.
	#[error("Malformed Plural-Forms header: {0:?}")]
	Header(String),
	/// The `plural=` expression itself does not parse.
	#[error("Invalid plural expression {expr:?}: {message}")]
	Expression { expr: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
	Number(u64),
	Variable,
	Not,
	AndAnd,
	OrOr,
	EqEq,
	NotEq,
	Lt,
	Gt,
	Le,
	Ge,
	Add,
	Sub,
	Mul,
	Div,
	Mod,
	Question,
	Colon,
	LParen,
	RParen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
	Or,
	And,
	Eq,
	NotEq,
	Lt,
	Gt,
	Le,
	Ge,
	Add,
	Sub,
	Mul,
	Div,
	Mod,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Expr {
	Number(u64),
	Variable,
	Not(Box<Expr>),
	Binary(BinaryOp, Box<Expr>, Box<Expr>),
	Conditional(Box<Expr>, Box<Expr>, Box<Expr>),
}

impl Expr {
	fn evaluate(&self, n: u64) -> u64 {
		match self {
			Expr::Number(value) => *value,
			Expr::Variable => n,
			Expr::Not(inner) => u64::from(inner.evaluate(n) == 0),
			Expr::Binary(op, left, right) => {
				let a = left.evaluate(n);
				let b = right.evaluate(n);
				match op {
					BinaryOp::Or => u64::from(a != 0 || b != 0),
					BinaryOp::And => u64::from(a != 0 && b != 0),
					BinaryOp::Eq => u64::from(a == b),
					BinaryOp::NotEq => u64::from(a != b),
					BinaryOp::Lt => u64::from(a < b),
					BinaryOp::Gt => u64::from(a > b),
					BinaryOp::Le => u64::from(a <= b),
					BinaryOp::Ge => u64::from(a >= b),
					BinaryOp::Add => a.wrapping_add(b),
					BinaryOp::Sub => a.wrapping_sub(b),
					BinaryOp::Mul => a.wrapping_mul(b),
					// Expressions are catalog data; a zero divisor yields 0
					// rather than trapping mid-translation.
					BinaryOp::Div => a.checked_div(b).unwrap_or(0),
					BinaryOp::Mod => a.checked_rem(b).unwrap_or(0),
				}
			}
			Expr::Conditional(condition, when_true, when_false) => {
				if condition.evaluate(n) != 0 {
					when_true.evaluate(n)
				} else {
					when_false.evaluate(n)
				}
			}
		}
	}
}

fn tokenize(src: &str) -> Result<Vec<Token>, String> {
	let bytes = src.as_bytes();
	let mut tokens = Vec::new();
	let mut i = 0;
	while i < bytes.len() {
		match bytes[i] {
			b' ' | b'\t' | b'\n' | b'\r' => i += 1,
			b'0'..=b'9' => {
				let start = i;
				while i < bytes.len() && bytes[i].is_ascii_digit() {
					i += 1;
				}
				let text = &src[start..i];
				let value = text
					.parse::<u64>()
					.map_err(|_| format!("Integer literal out of range: {text}"))?;
				tokens.push(Token::Number(value));
			}
			b'n' => {
				tokens.push(Token::Variable);
				i += 1;
			}
			b'=' => {
				if bytes.get(i + 1) != Some(&b'=') {
					return Err("Expected '==' after '='".to_string());
				}
				tokens.push(Token::EqEq);
				i += 2;
			}
			b'!' => {
				if bytes.get(i + 1) == Some(&b'=') {
					tokens.push(Token::NotEq);
					i += 2;
				} else {
					tokens.push(Token::Not);
					i += 1;
				}
			}
			b'<' => {
				if bytes.get(i + 1) == Some(&b'=') {
					tokens.push(Token::Le);
					i += 2;
				} else {
					tokens.push(Token::Lt);
					i += 1;
				}
			}
			b'>' => {
				if bytes.get(i + 1) == Some(&b'=') {
					tokens.push(Token::Ge);
					i += 2;
				} else {
					tokens.push(Token::Gt);
					i += 1;
				}
			}
			b'&' => {
				if bytes.get(i + 1) != Some(&b'&') {
					return Err("Expected '&&' after '&'".to_string());
				}
				tokens.push(Token::AndAnd);
				i += 2;
			}
			b'|' => {
				if bytes.get(i + 1) != Some(&b'|') {
					return Err("Expected '||' after '|'".to_string());
				}
				tokens.push(Token::OrOr);
				i += 2;
			}
			b'+' => {
				tokens.push(Token::Add);
				i += 1;
			}
			b'-' => {
				tokens.push(Token::Sub);
				i += 1;
			}
			b'*' => {
				tokens.push(Token::Mul);
				i += 1;
			}
			b'/' => {
				tokens.push(Token::Div);
				i += 1;
			}
			b'%' => {
				tokens.push(Token::Mod);
				i += 1;
			}
			b'?' => {
				tokens.push(Token::Question);
				i += 1;
			}
			b':' => {
				tokens.push(Token::Colon);
				i += 1;
			}
			b'(' => {
				tokens.push(Token::LParen);
				i += 1;
			}
			b')' => {
				tokens.push(Token::RParen);
				i += 1;
			}
			other => {
				return Err(format!("Unexpected character {:?}", other as char));
			}
		}
	}
	Ok(tokens)
}

struct Parser<'a> {
	tokens: &'a [Token],
	pos: usize,
}

impl Parser<'_> {
	fn peek(&self) -> Option<Token> {
		self.tokens.get(self.pos).copied()
	}

	fn advance(&mut self) -> Option<Token> {
		let token = self.peek();
		if token.is_some() {
			self.pos += 1;
		}
		token
	}

	fn eat(&mut self, token: Token) -> bool {
		if self.peek() == Some(token) {
			self.pos += 1;
			return true;
		}
		false
	}

	fn expect(&mut self, token: Token) -> Result<(), String> {
		if self.eat(token) {
			Ok(())
		} else {
			Err(format!("Expected {token:?}"))
		}
	}

	// C conditionals are right-associative, which is what makes the
	// idiomatic `a ? 0 : b ? 1 : 2` chains in plural headers work.
	fn conditional(&mut self) -> Result<Expr, String> {
		let condition = self.logical_or()?;
		if !self.eat(Token::Question) {
			return Ok(condition);
		}
		let when_true = self.conditional()?;
		self.expect(Token::Colon)?;
		let when_false = self.conditional()?;
		Ok(Expr::Conditional(
			Box::new(condition),
			Box::new(when_true),
			Box::new(when_false),
		))
	}

	fn logical_or(&mut self) -> Result<Expr, String> {
		let mut left = self.logical_and()?;
		while self.eat(Token::OrOr) {
			let right = self.logical_and()?;
			left = Expr::Binary(BinaryOp::Or, Box::new(left), Box::new(right));
		}
		Ok(left)
	}

	fn logical_and(&mut self) -> Result<Expr, String> {
		let mut left = self.equality()?;
		while self.eat(Token::AndAnd) {
			let right = self.equality()?;
			left = Expr::Binary(BinaryOp::And, Box::new(left), Box::new(right));
		}
		Ok(left)
	}

	fn equality(&mut self) -> Result<Expr, String> {
		let mut left = self.relational()?;
		loop {
			let op = match self.peek() {
				Some(Token::EqEq) => BinaryOp::Eq,
				Some(Token::NotEq) => BinaryOp::NotEq,
				_ => break,
			};
			self.pos += 1;
			let right = self.relational()?;
			left = Expr::Binary(op, Box::new(left), Box::new(right));
		}
		Ok(left)
	}

	fn relational(&mut self) -> Result<Expr, String> {
		let mut left = self.additive()?;
		loop {
			let op = match self.peek() {
				Some(Token::Lt) => BinaryOp::Lt,
				Some(Token::Gt) => BinaryOp::Gt,
				Some(Token::Le) => BinaryOp::Le,
				Some(Token::Ge) => BinaryOp::Ge,
				_ => break,
			};
			self.pos += 1;
			let right = self.additive()?;
			left = Expr::Binary(op, Box::new(left), Box::new(right));
		}
		Ok(left)
	}

	fn additive(&mut self) -> Result<Expr, String> {
		let mut left = self.multiplicative()?;
		loop {
			let op = match self.peek() {
				Some(Token::Add) => BinaryOp::Add,
				Some(Token::Sub) => BinaryOp::Sub,
				_ => break,
			};
			self.pos += 1;
			let right = self.multiplicative()?;
			left = Expr::Binary(op, Box::new(left), Box::new(right));
		}
		Ok(left)
	}

	fn multiplicative(&mut self) -> Result<Expr, String> {
		let mut left = self.unary()?;
		loop {
			let op = match self.peek() {
				Some(Token::Mul) => BinaryOp::Mul,
				Some(Token::Div) => BinaryOp::Div,
				Some(Token::Mod) => BinaryOp::Mod,
				_ => break,
			};
			self.pos += 1;
			let right = self.unary()?;
			left = Expr::Binary(op, Box::new(left), Box::new(right));
		}
		Ok(left)
	}

	fn unary(&mut self) -> Result<Expr, String> {
		if self.eat(Token::Not) {
			let inner = self.unary()?;
			return Ok(Expr::Not(Box::new(inner)));
		}
		self.primary()
	}

	fn primary(&mut self) -> Result<Expr, String> {
		match self.advance() {
			Some(Token::Number(value)) => Ok(Expr::Number(value)),
			Some(Token::Variable) => Ok(Expr::Variable),
			Some(Token::LParen) => {
				let inner = self.conditional()?;
				self.expect(Token::RParen)?;
				Ok(inner)
			}
			Some(other) => Err(format!("Unexpected token {other:?}")),
			None => Err("Unexpected end of expression".to_string()),
		}
	}
}

fn parse_expr(src: &str) -> Result<Expr, PluralRuleError> {
	let wrap = |message: String| PluralRuleError::Expression {
		expr: src.to_string(),
		message,
	};
	let tokens = tokenize(src).map_err(wrap)?;
	let mut parser = Parser { tokens: &tokens, pos: 0 };
	let expr = parser.conditional().map_err(wrap)?;
	if parser.pos != tokens.len() {
		return Err(wrap("Trailing input after expression".to_string()));
	}
	Ok(expr)
}

/// A parsed `Plural-Forms` rule: the number of forms a language has and
/// the expression mapping a count onto a form index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralRule {
	nplurals: usize,
	expr: Expr,
}

impl PluralRule {
	/// Parses a declaration of the shape `nplurals=N; plural=EXPR;`.
	///
	/// Key order does not matter and unknown keys are ignored, but both
	/// `nplurals` (non-zero) and `plural` must be present.
	pub fn parse(header: &str) -> Result<Self, PluralRuleError> {
		let mut nplurals = None;
		let mut plural = None;
		for part in header.split(';') {
			let part = part.trim();
			if part.is_empty() {
				continue;
			}
			let Some((key, value)) = part.split_once('=') else {
				return Err(PluralRuleError::Header(header.to_string()));
			};
			match key.trim() {
				"nplurals" => {
					let count = value
						.trim()
						.parse::<usize>()
						.map_err(|_| PluralRuleError::Header(header.to_string()))?;
					nplurals = Some(count);
				}
				"plural" => plural = Some(value.trim()),
				_ => {}
			}
		}
		let (Some(nplurals), Some(plural)) = (nplurals, plural) else {
			return Err(PluralRuleError::Header(header.to_string()));
		};
		if nplurals == 0 {
			return Err(PluralRuleError::Header(header.to_string()));
		}
		Ok(Self {
			nplurals,
			expr: parse_expr(plural)?,
		})
	}

	/// Declared number of plural forms.
	pub fn nplurals(&self) -> usize {
		self.nplurals
	}

	/// Form index for a count.
	///
	/// The index is reported exactly as the expression computes it, with
	/// no clamping to [`nplurals`](Self::nplurals); callers decide how to
	/// treat an index the catalog entry does not carry.
	pub fn evaluate(&self, n: u64) -> usize {
		self.expr.evaluate(n) as usize
	}
}

impl Default for PluralRule {
	/// The germanic two-form rule (`nplurals=2; plural=n != 1`), which
	/// gettext assumes when a catalog has no `Plural-Forms` header.
	fn default() -> Self {
		Self {
			nplurals: 2,
			expr: Expr::Binary(
				BinaryOp::NotEq,
				Box::new(Expr::Variable),
				Box::new(Expr::Number(1)),
			),
		}
	}
}
