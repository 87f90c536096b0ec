mod errors;
mod keyspace;
mod lists;
mod sorted_sets;
mod strings;
