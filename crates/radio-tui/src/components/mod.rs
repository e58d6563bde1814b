pub mod station_list;
