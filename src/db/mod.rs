pub mod match_queries;
pub mod seeder;
pub mod standings_queries;
