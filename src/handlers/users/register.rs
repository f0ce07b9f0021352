use super::*;

pub const COMMAND: &str = "users.register";

#[derive(Deserialize)]
pub struct Input {
    pub email: String,
    pub name: String,
    pub password: String,
}

pub fn guard(ctx: &Context<Library>) -> bool {
    ctx.has_fields(&["email", "name", "password"])
}

pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let user = create_account(ctx.db(), &input.email, &input.name, &input.password, Role::User)?;
    to_value(view(ctx.db(), user.entity.id())?)
}

/// Create a user together with their Archive and Borrowing shelves.
pub fn create_account(
    db: &Database,
    email: &str,
    name: &str,
    password: &str,
    role: Role,
) -> Result<User, HandlerError> {
    validation::password(password)?;
    let mut user = User::create(email, name, auth::hash_password(password)?, role)?;
    let mut shelves = Bookshelf::defaults_for(user.entity.id())?;

    let mut batch: Vec<&mut dyn Persist> = vec![&mut user];
    batch.extend(shelves.iter_mut().map(|shelf| shelf as &mut dyn Persist));
    db.commit(&mut batch)?;

    Ok(user)
}
